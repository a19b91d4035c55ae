use iced::widget::{button, column, container, row, text, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};
use tracing::debug;

use crate::components::{accent_gradient, bold, icon, view_skeleton_block, ICON_PLAY_FILL, ICON_X_LG};
use crate::media::{Message, Video, SURFACE_NAVY, TEXT_GRAY, TEXT_WHITE};
use crate::Cinescope;

const POPUP_WIDTH: f32 = 800.0;
const PREVIEW_HEIGHT: f32 = 450.0;

fn popup_container_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(SURFACE_NAVY)),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 16.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.6),
            offset: iced::Vector::new(0.0, 8.0),
            blur_radius: 24.0,
        },
        ..Default::default()
    }
}

impl Cinescope {
    /// Modal shown over the details page while a video is selected. Clicking
    /// the dimmed backdrop closes it.
    pub fn view_video_popup<'a>(&'a self, video: &'a Video) -> Element<'a, Message> {
        let preview: Element<Message> = match self.images.get(&video.thumbnail_url()) {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(PREVIEW_HEIGHT))
                .content_fit(iced::ContentFit::Cover)
                .into(),
            None => view_skeleton_block(POPUP_WIDTH, PREVIEW_HEIGHT, 0.0),
        };

        let close = button(icon(ICON_X_LG).size(16).color(TEXT_WHITE))
            .padding(10)
            .style(|_theme, status| {
                let alpha = match status {
                    button::Status::Hovered => 0.9,
                    _ => 0.6,
                };
                button::Style {
                    background: Some(iced::Background::Color(Color::from_rgba(
                        0.0, 0.0, 0.0, alpha,
                    ))),
                    text_color: TEXT_WHITE,
                    border: Border::default().rounded(18),
                    shadow: Shadow::default(),
                    snap: false,
                }
            })
            .on_press(Message::CloseVideo);

        let close_overlay = container(close)
            .width(Length::Fill)
            .align_x(iced::alignment::Horizontal::Right)
            .padding(12);

        let watch = button(
            row![
                icon(ICON_PLAY_FILL).size(16),
                text("Watch on YouTube").size(16).font(bold())
            ]
            .spacing(10)
            .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(12.0).left(24.0).right(24.0))
        .style(|_theme, _status| button::Style {
            background: Some(accent_gradient()),
            text_color: TEXT_WHITE,
            border: Border::default().rounded(24),
            shadow: Shadow::default(),
            snap: false,
        })
        .on_press(Message::WatchOnYoutube(video.watch_url()));

        let mut caption = column![text(video.name.as_str()).size(20).color(TEXT_WHITE).font(bold())]
            .spacing(6);
        if let Some(kind) = video.kind.as_deref() {
            caption = caption.push(text(kind).size(14).color(TEXT_GRAY));
        }

        let body = column![
            iced::widget::stack![preview, close_overlay],
            row![caption, Space::new().width(Length::Fill), watch]
                .padding(20)
                .align_y(iced::Alignment::Center)
        ];

        let popup = container(body)
            .width(Length::Fixed(POPUP_WIDTH))
            .clip(true)
            .style(popup_container_style);

        let backdrop = iced::widget::mouse_area(
            container(Space::new().width(Length::Fill).height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(Color::from_rgba(
                        0.0, 0.0, 0.0, 0.85,
                    ))),
                    ..Default::default()
                }),
        )
        .on_press(Message::CloseVideo);

        let centered = container(iced::widget::mouse_area(popup))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .padding(40);

        iced::widget::stack![backdrop, centered]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn browser_command(url: &str) -> tokio::process::Command {
    let mut command = if cfg!(target_os = "macos") {
        tokio::process::Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = tokio::process::Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        tokio::process::Command::new("xdg-open")
    };
    command
        .arg(url)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null());
    command
}

/// Hands `url` to the desktop's default browser.
pub async fn open_in_browser(url: String) -> Result<(), String> {
    debug!(%url, "opening browser");
    let status = browser_command(&url)
        .status()
        .await
        .map_err(|e| format!("failed to launch browser: {e}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("browser exited with {status}"))
    }
}
