use crate::color::PackedColor;
use crate::strip::EmulatedStrip;
use futures::{future, Sink, SinkExt};
use iced::subscription::{self, Subscription};
use log::debug;
use std::sync::Arc;
use std::time::Duration;

pub const BATCH_SIZE: usize = 5;

pub type ColorBatch = Vec<(usize, PackedColor)>;

/// One full pass over the strip, split into batches of `BATCH_SIZE`.
pub fn color_batches(strip: &EmulatedStrip) -> Vec<ColorBatch> {
    let colors: Vec<(usize, PackedColor)> = (0..strip.num_pixels())
        .filter_map(|i| strip.pixel_color(i).map(|c| (i, c)))
        .collect();
    colors.chunks(BATCH_SIZE).map(<[_]>::to_vec).collect()
}

/// Repeats full passes over the strip, sending one message per batch and
/// sleeping `interval` between passes. Returns once `output` stops accepting
/// messages.
pub async fn run_poll_loop<S, Message>(
    strip: &EmulatedStrip,
    interval: Duration,
    to_message: fn(ColorBatch) -> Message,
    mut output: S,
) where
    S: Sink<Message> + Unpin,
{
    loop {
        for batch in color_batches(strip) {
            if output.send(to_message(batch)).await.is_err() {
                return;
            }
        }
        tokio::time::sleep(interval).await;
    }
}

/// Polls the strip for as long as the subscription is alive, posting each
/// batch to the UI as one message.
pub fn poll_colors<Message>(
    strip: Arc<EmulatedStrip>,
    interval: Duration,
    to_message: fn(ColorBatch) -> Message,
) -> Subscription<Message>
where
    Message: Send + 'static,
{
    struct PollColors;

    subscription::channel(
        std::any::TypeId::of::<PollColors>(),
        4 * BATCH_SIZE,
        move |output| async move {
            run_poll_loop(&strip, interval, to_message, output).await;
            debug!("Color receiver closed, poller stopped");
            loop {
                future::pending::<()>().await;
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::spiral_layout;
    use futures::channel::mpsc;
    use futures::StreamExt;
    use std::time::Instant;

    #[test]
    fn test_batches_cover_strip_in_order() {
        let strip = EmulatedStrip::new(&spiral_layout(12, 22.0));
        strip.set_pixel_color(11, PackedColor(0xFFFFFF));

        let batches = color_batches(&strip);
        let sizes: Vec<usize> = batches.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![5, 5, 2]);

        let indices: Vec<usize> = batches.iter().flatten().map(|(i, _)| *i).collect();
        assert_eq!(indices, (0..12).collect::<Vec<_>>());
        assert_eq!(batches[2][1], (11, PackedColor(0xFFFFFF)));
    }

    #[test]
    fn test_single_short_batch() {
        let strip = EmulatedStrip::new(&spiral_layout(1, 22.0));
        assert_eq!(color_batches(&strip), vec![vec![(0, PackedColor::BLACK)]]);
    }

    #[tokio::test]
    async fn test_poll_loop_repeats_full_passes() {
        let strip = Arc::new(EmulatedStrip::new(&spiral_layout(12, 22.0)));
        let interval = Duration::from_millis(100);
        let (tx, mut rx) = mpsc::channel::<ColorBatch>(BATCH_SIZE);

        let started = Instant::now();
        let as_message: fn(ColorBatch) -> ColorBatch = |batch| batch;
        let poller = tokio::spawn({
            let strip = strip.clone();
            async move { run_poll_loop(&strip, interval, as_message, tx).await }
        });

        let mut first_pass = Vec::new();
        for _ in 0..3 {
            first_pass.push(rx.next().await.unwrap());
        }
        strip.set_pixel_color(11, PackedColor(0x00FF00));

        let mut second_pass = Vec::new();
        for _ in 0..3 {
            second_pass.push(rx.next().await.unwrap());
        }
        assert!(started.elapsed() >= interval);

        let sizes: Vec<usize> = first_pass.iter().chain(&second_pass).map(Vec::len).collect();
        assert_eq!(sizes, vec![5, 5, 2, 5, 5, 2]);
        assert_eq!(first_pass[2][1], (11, PackedColor::BLACK));
        assert_eq!(second_pass[2][1], (11, PackedColor(0x00FF00)));
        assert!(second_pass
            .iter()
            .flatten()
            .filter(|(i, _)| *i != 11)
            .all(|(_, c)| *c == PackedColor::BLACK));

        drop(rx);
        tokio::time::timeout(Duration::from_secs(1), poller)
            .await
            .unwrap()
            .unwrap();
    }
}
