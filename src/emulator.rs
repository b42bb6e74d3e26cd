use crate::animation::RunningAnimation;
use crate::config::EmulatorConfig;
use crate::error::EmulatorError;
use crate::layout::{center_offset, pane_size, PixelLocation};
use crate::led_spiral::{apply_batch, LedSpiral, Marker};
use crate::location::Location;
use crate::poller::{self, ColorBatch};
use crate::presets::{Preset, PresetAction};
use crate::server::LedServer;
use chrono::{DateTime, Utc};
use iced::executor;
use iced::widget::{button, canvas::Canvas, column, container, text, Row};
use iced::{window, Application, Command, Element, Length, Settings, Size, Subscription, Theme};
use log::{error, info};
use std::sync::Arc;
use std::time::Instant;

const MIN_WINDOW_WIDTH: f32 = 900.0;
const CONTROLS_HEIGHT: f32 = 120.0;

/// Everything the window needs, built once by `main`.
pub struct AppContext {
    pub server: Arc<LedServer>,
    pub layout: Vec<PixelLocation>,
    pub config: EmulatorConfig,
}

pub fn settings(context: AppContext) -> Settings<AppContext> {
    let pane = pane_size(context.config.num_pixels, context.config.scale) as f32;
    Settings {
        window: window::Settings {
            size: Size::new(pane.max(MIN_WINDOW_WIDTH), pane + CONTROLS_HEIGHT),
            min_size: Some(Size::new(pane, pane)),
            ..window::Settings::default()
        },
        antialiasing: true,
        ..Settings::with_flags(context)
    }
}

pub struct Emulator {
    context: AppContext,
    markers: Vec<Marker>,
    status: String,
    application_start_time: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartedAnimation {
    pub id: String,
    pub started_at: DateTime<Utc>,
}

impl From<RunningAnimation> for StartedAnimation {
    fn from(running: RunningAnimation) -> Self {
        Self {
            id: running.id,
            started_at: running.started_at,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    ColorsPolled(ColorBatch),
    Pressed(Preset),
    AnimationSubmitted(Result<StartedAnimation, EmulatorError>),
    AnimationSaved(String),
    PixelClicked(usize),
}

impl Emulator {
    fn center(&self) -> Location {
        let offset = center_offset(self.context.config.num_pixels, self.context.config.scale);
        Location::new(offset, offset)
    }

    fn dispatch(&self, action: PresetAction) -> Command<Message> {
        let server = self.context.server.clone();
        match action {
            PresetAction::Run(request) => Command::perform(
                async move { server.start_animation(request).map(StartedAnimation::from) },
                Message::AnimationSubmitted,
            ),
            PresetAction::Save(request) => Command::perform(
                async move { server.add_saved_animation(request).await },
                Message::AnimationSaved,
            ),
            PresetAction::StartSaved(key) => Command::perform(
                async move {
                    server
                        .start_saved_animation(&key)
                        .await
                        .map(StartedAnimation::from)
                },
                Message::AnimationSubmitted,
            ),
        }
    }
}

impl Application for Emulator {
    type Message = Message;
    type Theme = Theme;
    type Executor = executor::Default;
    type Flags = AppContext;

    fn new(context: AppContext) -> (Emulator, Command<Message>) {
        let strip = context.server.strip();
        let markers = context
            .layout
            .iter()
            .map(|l| Marker::new(l, strip.pixel_color(l.index).unwrap_or_default()))
            .collect();

        (
            Emulator {
                context,
                markers,
                status: String::new(),
                application_start_time: Instant::now(),
            },
            Command::none(),
        )
    }

    fn title(&self) -> String {
        String::from("WS281x Emulator")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::ColorsPolled(batch) => apply_batch(&mut self.markers, &batch),
            Message::Pressed(preset) => {
                info!("[{}] {} pressed", self.application_start_time.elapsed().as_secs(), preset.label());
                return self.dispatch(preset.action(self.center()));
            }
            Message::AnimationSubmitted(Ok(started)) => {
                self.status = format!(
                    "Started animation {} at {}",
                    started.id,
                    started.started_at.format("%H:%M:%S")
                );
            }
            Message::AnimationSubmitted(Err(e)) => {
                error!("[{}] Animation failed: {}", self.application_start_time.elapsed().as_secs(), e);
                self.status = e.to_string();
            }
            Message::AnimationSaved(key) => {
                self.status = format!("Saved animation as '{}'", key);
            }
            Message::PixelClicked(index) => {
                if let Some(marker) = self.markers.get(index) {
                    info!(
                        "pixel: {}\t centerX: ~{}\t centerY: ~{}\t color: {}",
                        index,
                        marker.position.x.round(),
                        marker.position.y.round(),
                        marker.packed
                    );
                }
            }
        }

        Command::none()
    }

    fn subscription(&self) -> Subscription<Message> {
        poller::poll_colors(
            self.context.server.strip().clone(),
            self.context.config.poll_interval,
            Message::ColorsPolled,
        )
    }

    fn view(&self) -> Element<Message> {
        let pane = pane_size(self.context.config.num_pixels, self.context.config.scale) as f32;

        let canvas = Canvas::new(LedSpiral::new(
            &self.markers,
            self.context.config.marker_radius,
            Message::PixelClicked,
        ))
        .width(Length::Fixed(pane))
        .height(Length::Fixed(pane));

        let buttons = Preset::ALL.into_iter().fold(Row::new().spacing(10), |row, preset| {
            row.push(
                button(text(preset.label()))
                    .padding(10)
                    .on_press(Message::Pressed(preset)),
            )
        });

        container(column![canvas, buttons, text(self.status.as_str()).size(16)].spacing(10))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(10)
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PackedColor;
    use crate::layout::spiral_layout;
    use std::time::Duration;

    fn emulator(num_pixels: usize) -> Emulator {
        let layout = spiral_layout(num_pixels, 22.0);
        let server = Arc::new(LedServer::new(&layout, tokio::runtime::Handle::current()));
        server.strip().set_pixel_color(0, PackedColor(0xFF0000));
        let config = EmulatorConfig {
            num_pixels,
            scale: 22.0,
            marker_radius: 20.0,
            poll_interval: Duration::from_millis(16),
        };
        Emulator::new(AppContext { server, layout, config }).0
    }

    #[tokio::test]
    async fn test_one_marker_per_pixel() {
        let emulator = emulator(10);
        assert_eq!(emulator.markers.len(), 10);
        assert!(emulator.markers.iter().enumerate().all(|(i, m)| m.index == i));
        assert_eq!(emulator.markers[0].packed, PackedColor(0xFF0000));
        assert_eq!(emulator.markers[1].packed, PackedColor::BLACK);
    }

    #[tokio::test]
    async fn test_polled_batch_updates_markers() {
        let mut emulator = emulator(10);
        let _ = emulator.update(Message::ColorsPolled(vec![(7, PackedColor(0x00FF00))]));
        assert_eq!(emulator.markers[7].packed, PackedColor(0x00FF00));
        assert_eq!(emulator.markers.len(), 10);
    }

    #[tokio::test]
    async fn test_errors_reach_status_line() {
        let mut emulator = emulator(3);
        let _ = emulator.update(Message::AnimationSubmitted(Err(
            EmulatorError::SavedAnimationNotFound("savedwave".to_string()),
        )));
        assert_eq!(emulator.status, "no saved animation with key 'savedwave'");

        let started_at = DateTime::parse_from_rfc3339("2024-05-01T12:34:56Z")
            .unwrap()
            .with_timezone(&Utc);
        let _ = emulator.update(Message::AnimationSubmitted(Ok(StartedAnimation {
            id: "abc".to_string(),
            started_at,
        })));
        assert_eq!(emulator.status, "Started animation abc at 12:34:56");
    }

    #[tokio::test]
    async fn test_center_matches_layout_offset() {
        let emulator = emulator(1);
        assert_eq!(emulator.center(), Location::new(42.0, 42.0));
    }
}
