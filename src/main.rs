use iced::widget::{button, column, container, row, scrollable, text};
use iced::{window, Alignment, Element, Event, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use uuid::Uuid;

mod api;
mod media;
mod state;
mod ui;

use api::client::ApiClient;
use media::loader::{self, LoadedSelection};
use state::analysis::AnalysisBoard;
use state::data::AnalysisResponse;

/// Main application state
struct VisualTagger {
    /// Per-image analysis tracking
    board: AnalysisBoard,
    /// Client for the remote analysis service
    client: ApiClient,
    /// Whether files are currently dragged over the window
    drag_active: bool,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the "Select Images" button
    PickImages,
    /// A batch of picked/dropped files finished loading
    SelectionLoaded(LoadedSelection),
    /// Files are being dragged over the window
    DragEntered,
    /// The drag left the window without dropping
    DragLeft,
    /// A file was dropped onto the window
    FileDropped(PathBuf),
    /// User clicked "Analyze All Images"
    AnalyzeAll,
    /// One image's upload settled, successfully or not
    EntrySettled(Uuid, Result<AnalysisResponse, String>),
    /// User cleared the selection
    Reset,
}

impl VisualTagger {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let client = ApiClient::from_env();

        println!("🏷️  Visual Tagger ready (endpoint: {})", client.base_url());

        (
            VisualTagger {
                board: AnalysisBoard::new(),
                client,
                drag_active: false,
                status: "Select or drop images to begin.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImages => {
                // Show the native file picker dialog
                let files = FileDialog::new()
                    .set_title("Select Images")
                    .add_filter("Images", &["jpg", "jpeg", "png", "gif", "webp", "bmp"])
                    .pick_files();

                if let Some(paths) = files {
                    self.status = format!("Loading {} file(s)...", paths.len());

                    return Task::perform(
                        loader::load_images(paths),
                        Message::SelectionLoaded,
                    );
                }

                Task::none()
            }
            Message::SelectionLoaded(selection) => {
                if !selection.rejected.is_empty() {
                    // Blocking alert listing the rejected filenames
                    rfd::MessageDialog::new()
                        .set_level(rfd::MessageLevel::Warning)
                        .set_title("Some files were ignored")
                        .set_description(format!(
                            "The following files are not images and were ignored: {}",
                            selection.rejected.join(", ")
                        ))
                        .show();
                }

                if !selection.images.is_empty() {
                    // New files append to the current selection; the board
                    // replaces its entry list wholesale with the result
                    let mut images = self.board.selected_images();
                    images.extend(selection.images);

                    self.status = format!("{} image(s) selected.", images.len());
                    self.board.ingest_selection(images);
                }

                Task::none()
            }
            Message::DragEntered => {
                self.drag_active = true;
                Task::none()
            }
            Message::DragLeft => {
                self.drag_active = false;
                Task::none()
            }
            Message::FileDropped(path) => {
                self.drag_active = false;

                Task::perform(
                    loader::load_images(vec![path]),
                    Message::SelectionLoaded,
                )
            }
            Message::AnalyzeAll => {
                if !self.board.begin_analysis() {
                    return Task::none();
                }

                let count = self.board.entries().len();
                self.status = format!("Analyzing {} image(s)...", count);
                println!("🔍 Analyzing {} image(s)", count);

                // One independent upload per entry; each settles through
                // its own message so results appear as they arrive
                let uploads = self.board.entries().iter().map(|entry| {
                    let client = self.client.clone();
                    let id = entry.image.id;
                    let filename = entry.image.filename.clone();
                    let bytes = entry.image.bytes.clone();

                    Task::perform(
                        async move {
                            client
                                .analyze_image(&filename, bytes)
                                .await
                                .map_err(|e| e.to_string())
                        },
                        move |outcome| Message::EntrySettled(id, outcome),
                    )
                });

                Task::batch(uploads)
            }
            Message::EntrySettled(id, outcome) => {
                if let Some(entry) = self.board.entry(id) {
                    match &outcome {
                        Ok(response) => println!(
                            "✅ Analysis complete: {} ({} tags)",
                            entry.image.filename,
                            response.tags.len()
                        ),
                        Err(error) => eprintln!(
                            "❌ Analysis failed for {}: {}",
                            entry.image.filename, error
                        ),
                    }
                }

                self.board.settle(id, outcome);

                if !self.board.is_loading_overall() {
                    self.status = "Analysis finished.".to_string();
                }

                Task::none()
            }
            Message::Reset => {
                self.board.reset();
                self.drag_active = false;
                self.status = "Select or drop images to begin.".to_string();

                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let entries = self.board.entries();
        let overall = self.board.is_loading_overall();

        let can_analyze = !self.board.is_empty()
            && !overall
            && (!self.board.has_activity() || entries.iter().any(|e| e.error.is_some()));

        let mut actions = row![].spacing(12);
        if can_analyze {
            actions = actions.push(
                button("Analyze All Images")
                    .on_press(Message::AnalyzeAll)
                    .padding(10),
            );
        }
        if !self.board.is_empty() {
            actions = actions.push(
                button("Clear All")
                    .on_press_maybe((!overall).then_some(Message::Reset))
                    .padding(10),
            );
        }

        let mut content = column![
            text("Visual Tagging").size(36),
            ui::upload::upload_area(entries, self.drag_active),
            actions,
        ]
        .spacing(20)
        .padding(30)
        .align_x(Alignment::Center)
        .width(Length::Fill);

        if entries.is_empty() {
            content = content.push(
                container(
                    column![
                        text("Select or drag images to start the analysis.").size(18),
                        text("Discover what the analysis service sees in your photos!").size(14),
                    ]
                    .spacing(6)
                    .align_x(Alignment::Center),
                )
                .padding(20)
                .width(Length::Fill)
                .center_x(Length::Fill),
            );
        } else {
            let mut cards = column![].spacing(16);
            for entry in entries {
                cards = cards.push(ui::results::entry_card(entry));
            }

            content = content.push(scrollable(cards).height(Length::Fill));
        }

        content = content.push(text(self.status.as_str()).size(14));

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Listen for window-level drag and drop events
    fn subscription(&self) -> Subscription<Message> {
        iced::event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::DragEntered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::DragLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application(
        "Visual Tagger",
        VisualTagger::update,
        VisualTagger::view,
    )
    .subscription(VisualTagger::subscription)
    .theme(VisualTagger::theme)
    .centered()
    .run_with(VisualTagger::new)
}
