use std::{sync::Arc, time::Duration};

use chrono::NaiveDate;
use iced::{
    Alignment, Border, Color, Element, Length, Shadow, Task, Theme, Vector,
    widget::{
        Space, button, column, container, pick_list, row, scrollable, stack, text, text_input,
    },
};
use roomboard::{
    config::AppConfig,
    fetch::ScheduleClient,
    model::RawRecord,
    render::CellStatus,
    style,
    traits::Clock,
    viewer::{Jump, Viewer},
};
use thiserror::Error;

/// Height of one table row; also the scroll step for jump targets.
const TABLE_ROW_HEIGHT: f32 = 34.0;

/// Typed Application Errors
#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Failed to load schedule: {0}")]
    Load(String),
}

pub struct RoomboardApp {
    config: Arc<AppConfig>,
    client: ScheduleClient,
    clock: Arc<dyn Clock>,

    // One load attempt's outcome: either a viewer over the data set or a
    // terminal error rendered as a full-width table row. Never both.
    viewer: Option<Viewer>,
    load_error: Option<AppError>,
    is_loading: bool,

    timestamp: Option<String>,
    date_input: String,
    toast: Option<String>,
    highlighted_row: Option<usize>,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Data Results
    ScheduleLoaded(Result<Vec<RawRecord>, AppError>),
    TimestampLoaded(Option<String>),
    Reload,

    // Selection & Navigation
    RoomSelected(String),
    DateInputChanged(String),
    JumpToDate,
    JumpToToday,

    // Deferred UI effects
    HighlightRow(usize),
    ClearToast,
}

impl RoomboardApp {
    pub fn new(
        client: ScheduleClient,
        config: Arc<AppConfig>,
        clock: Arc<dyn Clock>,
    ) -> (Self, Task<Message>) {
        let app = Self {
            config,
            client: client.clone(),
            clock,
            viewer: None,
            load_error: None,
            is_loading: true,
            timestamp: None,
            date_input: String::new(),
            toast: None,
            highlighted_row: None,
        };

        // The two startup fetches are independent of each other; only the
        // schedule load gates rendering.
        let initial_tasks = Task::batch([
            Self::load_schedule(client.clone()),
            Self::load_timestamp(client),
        ]);

        (app, initial_tasks)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ScheduleLoaded(result) => {
                self.is_loading = false;
                match result {
                    Ok(records) => {
                        self.viewer = Some(Viewer::from_records(records));
                        self.load_error = None;
                        self.highlighted_row = None;
                        Task::none()
                    }
                    Err(e) => {
                        // Terminal for this load attempt: no partial data.
                        tracing::error!("Schedule load failed: {}", e);
                        self.viewer = None;
                        let notice = e.to_string();
                        self.load_error = Some(e);
                        self.show_toast(notice)
                    }
                }
            }
            Message::TimestampLoaded(timestamp) => {
                self.timestamp = timestamp;
                Task::none()
            }
            Message::Reload => {
                self.is_loading = true;
                self.load_error = None;
                self.highlighted_row = None;
                Task::batch([
                    Self::load_schedule(self.client.clone()),
                    Self::load_timestamp(self.client.clone()),
                ])
            }
            Message::RoomSelected(room) => {
                if let Some(viewer) = self.viewer.as_mut() {
                    viewer.select_room(&room);
                }
                self.highlighted_row = None;
                Task::none()
            }
            Message::DateInputChanged(value) => {
                self.date_input = value;
                Task::none()
            }
            Message::JumpToDate => {
                let Some(date) = parse_date(&self.date_input) else {
                    return self.show_toast("Invalid date, use YYYY-MM-DD".to_string());
                };
                let jump = match self.viewer.as_mut() {
                    Some(viewer) => viewer.jump_to_date(date),
                    None => return Task::none(),
                };
                self.apply_jump(jump)
            }
            Message::JumpToToday => {
                let clock = self.clock.clone();
                let jump = match self.viewer.as_mut() {
                    Some(viewer) => viewer.jump_to_today(clock.as_ref()),
                    None => return Task::none(),
                };
                self.apply_jump(jump)
            }
            Message::HighlightRow(index) => {
                self.highlighted_row = Some(index);
                Task::none()
            }
            Message::ClearToast => {
                self.toast = None;
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content = column![
            self.view_header(),
            Space::new().height(16),
            self.view_controls(),
            Space::new().height(12),
            self.view_stats(),
            Space::new().height(12),
            self.view_table(),
        ];

        let app_layout = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(24);

        if let Some(msg) = &self.toast {
            let toast = container(text(msg).size(14).color(style::TEXT_BRIGHT))
                .padding([12, 24])
                .style(|_| container::Style {
                    background: Some(style::BG_CARD.into()),
                    border: Border {
                        radius: 20.0.into(),
                        width: 1.0,
                        color: style::ACCENT_BLUE,
                    },
                    shadow: Shadow {
                        color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
                        offset: Vector::new(0.0, 4.0),
                        blur_radius: 10.0,
                    },
                    ..Default::default()
                });
            stack![
                app_layout,
                container(toast)
                    .width(Length::Fill)
                    .align_x(Alignment::Center)
                    .padding(30)
            ]
            .into()
        } else {
            app_layout.into()
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    // --- VIEW COMPONENTS ---

    fn view_header(&self) -> Element<'_, Message> {
        let last_updated = format!(
            "Last updated: {}",
            self.timestamp.as_deref().unwrap_or("unknown")
        );

        let status: Element<'_, Message> = if self.is_loading {
            text("Loading...").size(14).color(style::ACCENT_BLUE).into()
        } else {
            text(last_updated).size(14).color(style::TEXT_MUTED).into()
        };

        row![
            text(self.config.window.title.as_str())
                .size(28)
                .color(style::TEXT_BRIGHT),
            Space::new().width(Length::Fill),
            status,
            Space::new().width(10),
            button(text("↻").size(18))
                .on_press(Message::Reload)
                .padding(10)
                .style(|_, _| button::Style {
                    background: Some(style::BG_CARD.into()),
                    text_color: style::TEXT_BRIGHT,
                    border: Border {
                        radius: 8.0.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                })
        ]
        .align_y(Alignment::Center)
        .into()
    }

    fn view_controls(&self) -> Element<'_, Message> {
        let rooms: Vec<String> = self
            .viewer
            .as_ref()
            .map(|v| v.rooms().to_vec())
            .unwrap_or_default();
        let selected = self
            .viewer
            .as_ref()
            .and_then(|v| v.current_room().map(str::to_string));

        let room_selector = pick_list(rooms, selected, Message::RoomSelected)
            .placeholder("Room")
            .width(Length::Fixed(140.0));

        // With no date range there are no bounds worth showing, so the
        // hint stays empty.
        let range_hint = self
            .viewer
            .as_ref()
            .and_then(|v| v.range())
            .map(|range| format!("{} to {}", range.min, range.max))
            .unwrap_or_default();

        row![
            room_selector,
            Space::new().width(20),
            styled_input(&self.date_input, Message::DateInputChanged),
            Space::new().width(6),
            text(range_hint).size(12).color(style::TEXT_MUTED),
            Space::new().width(Length::Fill),
            button(text("Go to date").size(14))
                .on_press(Message::JumpToDate)
                .padding([8, 16])
                .style(secondary_btn_style),
            Space::new().width(10),
            button(text("Today").size(14))
                .on_press(Message::JumpToToday)
                .padding([8, 16])
                .style(primary_btn_style),
        ]
        .align_y(Alignment::Center)
        .into()
    }

    fn view_stats(&self) -> Element<'_, Message> {
        let Some(viewer) = self.viewer.as_ref() else {
            return Space::new().height(0).into();
        };

        row![
            text(format!("✓ Available: {}", viewer.available_count()))
                .size(14)
                .color(style::ACCENT_GREEN),
            Space::new().width(24),
            text(format!("✗ Occupied: {}", viewer.occupied_count()))
                .size(14)
                .color(style::ACCENT_RED),
        ]
        .align_y(Alignment::Center)
        .into()
    }

    fn view_table(&self) -> Element<'_, Message> {
        let header = container(row![
            header_cell("Date"),
            header_cell("Day"),
            header_cell("Morning"),
            header_cell("Afternoon"),
            header_cell("Evening"),
        ])
        .width(Length::Fill)
        .style(|_| container::Style {
            background: Some(style::BG_CARD.into()),
            border: Border {
                color: style::STROKE_DIM,
                width: 1.0,
                ..Default::default()
            },
            ..Default::default()
        });

        let body: Element<'_, Message> = if let Some(e) = &self.load_error {
            // A failed load renders as a single full-width error row, not
            // an empty table.
            full_width_row(e.to_string(), style::ACCENT_RED)
        } else if self.is_loading {
            full_width_row("Loading schedule...".to_string(), style::TEXT_MUTED)
        } else {
            match self.viewer.as_ref() {
                Some(viewer) if viewer.rendered().is_empty() => {
                    full_width_row("No data found for this room".to_string(), style::TEXT_MUTED)
                }
                Some(viewer) => {
                    let mut rows = column![];
                    for (index, rendered) in viewer.rendered().iter().enumerate() {
                        let background: Option<iced::Background> = if self.highlighted_row
                            == Some(index)
                        {
                            Some(style::BG_ROW_HIGHLIGHT.into())
                        } else if rendered.weekend {
                            Some(style::BG_ROW_WEEKEND.into())
                        } else {
                            None
                        };

                        let weekday_color = if rendered.weekend {
                            style::ACCENT_BLUE
                        } else {
                            style::TEXT_MUTED
                        };

                        rows = rows.push(
                            container(row![
                                body_cell(
                                    text(rendered.display_date.clone())
                                        .size(14)
                                        .color(style::TEXT_BRIGHT)
                                ),
                                body_cell(
                                    text(rendered.weekday.clone())
                                        .size(14)
                                        .color(weekday_color)
                                ),
                                period_cell(rendered.morning),
                                period_cell(rendered.afternoon),
                                period_cell(rendered.evening),
                            ])
                            .width(Length::Fill)
                            .height(Length::Fixed(TABLE_ROW_HEIGHT))
                            .style(move |_| container::Style {
                                background,
                                ..Default::default()
                            }),
                        );
                    }
                    rows.into()
                }
                None => full_width_row("No data loaded".to_string(), style::TEXT_MUTED),
            }
        };

        column![
            header,
            scrollable(body)
                .id(Self::table_id())
                .width(Length::Fill)
                .height(Length::Fill)
        ]
        .into()
    }

    // --- TASK BUILDERS ---

    fn load_schedule(client: ScheduleClient) -> Task<Message> {
        Task::perform(
            async move { client.fetch_schedule().await },
            |r: Result<Vec<RawRecord>, anyhow::Error>| {
                Message::ScheduleLoaded(r.map_err(|e| AppError::Load(e.to_string())))
            },
        )
    }

    fn load_timestamp(client: ScheduleClient) -> Task<Message> {
        Task::perform(
            async move { client.fetch_timestamp().await },
            Message::TimestampLoaded,
        )
    }

    /// Act on a jump outcome: scroll first, highlight after a short delay
    /// so the scroll settles, and surface any notice as a toast.
    fn apply_jump(&mut self, jump: Jump) -> Task<Message> {
        self.highlighted_row = None;
        let mut tasks = Vec::new();

        if let Some(index) = jump.target_row() {
            tasks.push(Self::scroll_to_row(index));

            let delay = self.config.ui.highlight_delay_ms;
            tasks.push(Task::perform(
                async move {
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                },
                move |_| Message::HighlightRow(index),
            ));
        }

        if let Some(notice) = jump.notice() {
            tasks.push(self.show_toast(notice));
        }

        Task::batch(tasks)
    }

    fn show_toast(&mut self, notice: String) -> Task<Message> {
        self.toast = Some(notice);
        let secs = self.config.ui.toast_duration_secs;
        Task::perform(
            async move {
                tokio::time::sleep(Duration::from_secs(secs)).await;
            },
            |_| Message::ClearToast,
        )
    }

    fn scroll_to_row(index: usize) -> Task<Message> {
        iced::advanced::widget::operate(iced::advanced::widget::operation::scrollable::scroll_to(
            Self::table_id(),
            scrollable::AbsoluteOffset {
                x: Some(0.0),
                y: Some(index as f32 * TABLE_ROW_HEIGHT),
            },
        ))
    }

    fn table_id() -> iced::advanced::widget::Id {
        iced::advanced::widget::Id::new("availability-table")
    }
}

// --- HELPER FUNCTIONS ---

fn header_cell(label: &str) -> Element<'_, Message> {
    container(text(label.to_string()).size(13).color(style::TEXT_MUTED))
        .width(Length::FillPortion(1))
        .padding([8, 10])
        .into()
}

fn body_cell<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::FillPortion(1))
        .padding([6, 10])
        .into()
}

fn period_cell(status: CellStatus) -> Element<'static, Message> {
    let color = if status.is_available() {
        style::ACCENT_GREEN
    } else {
        style::ACCENT_RED
    };
    container(text(status.mark()).size(14).color(color))
        .width(Length::FillPortion(1))
        .padding([6, 10])
        .align_x(Alignment::Center)
        .into()
}

fn full_width_row(message: String, color: Color) -> Element<'static, Message> {
    container(text(message).size(14).color(color))
        .width(Length::Fill)
        .padding(20)
        .align_x(Alignment::Center)
        .into()
}

fn styled_input(
    val: &str,
    on_change: impl Fn(String) -> Message + 'static,
) -> Element<'_, Message> {
    text_input("YYYY-MM-DD", val)
        .on_input(on_change)
        .on_submit(Message::JumpToDate)
        .padding(8)
        .width(Length::Fixed(110.0))
        .size(12)
        .style(|_, status| {
            let border_color = if matches!(status, iced::widget::text_input::Status::Focused { .. })
            {
                style::ACCENT_BLUE
            } else {
                style::STROKE_DIM
            };
            text_input::Style {
                background: style::BG_DARK.into(),
                border: Border {
                    color: border_color,
                    width: 1.0,
                    radius: 6.0.into(),
                },
                icon: style::TEXT_MUTED,
                placeholder: style::TEXT_MUTED,
                value: style::TEXT_BRIGHT,
                selection: style::ACCENT_BLUE,
            }
        })
        .into()
}

fn primary_btn_style(_: &Theme, _: iced::widget::button::Status) -> button::Style {
    button::Style {
        background: Some(style::ACCENT_BLUE.into()),
        text_color: style::BG_DARK,
        border: Border {
            radius: 6.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn secondary_btn_style(_: &Theme, _: iced::widget::button::Status) -> button::Style {
    button::Style {
        background: Some(style::BG_DARK.into()),
        text_color: style::TEXT_BRIGHT,
        border: Border {
            radius: 6.0.into(),
            color: style::STROKE_DIM,
            width: 1.0,
        },
        ..Default::default()
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
