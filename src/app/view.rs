// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! Composes the status banner, scan controls, live preview, and hint text
//! into a single column. The settings drawer is also built here.

use crate::app::state::{AppModel, ContextPage, Message};
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::app::context_drawer;
use cosmic::iced::{Alignment, Background, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let status = self.build_status_banner();
        let controls = self.build_controls();
        let preview = self.build_preview();

        let hint = widget::text(fl!("hint-aim")).size(ui::HINT_TEXT_SIZE);

        widget::column()
            .push(status)
            .push(controls)
            .push(preview)
            .push(hint)
            .spacing(spacing.space_s)
            .padding(spacing.space_s)
            .align_x(Alignment::Center)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Colored status banner
    fn build_status_banner(&self) -> Element<'_, Message> {
        let color = self.status.kind.color();
        let text = if self.status.text.is_empty() {
            fl!("status-idle")
        } else {
            self.status.text.clone()
        };

        widget::container(widget::text(text).size(ui::STATUS_TEXT_SIZE))
            .style(move |_theme| widget::container::Style {
                text_color: Some(color),
                ..Default::default()
            })
            .width(Length::Fill)
            .align_x(Alignment::Center)
            .into()
    }

    /// Start/stop scan buttons
    fn build_controls(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let mut start = widget::button::suggested(fl!("start-scan"));
        if self.scan.is_idle() {
            start = start.on_press(Message::StartScan);
        }

        let mut stop = widget::button::destructive(fl!("stop-scan"));
        if !self.scan.is_idle() {
            stop = stop.on_press(Message::StopScan);
        }

        widget::row()
            .push(start)
            .push(stop)
            .spacing(spacing.space_s)
            .align_y(Alignment::Center)
            .into()
    }

    /// Live camera preview, or a placeholder when idle
    fn build_preview(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match &self.preview {
            Some(handle) => widget::image(handle.clone())
                .content_fit(cosmic::iced::ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => widget::text(fl!("preview-idle")).into(),
        };

        widget::container(content)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::BLACK)),
                ..Default::default()
            })
            .align_x(Alignment::Center)
            .align_y(Alignment::Center)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Settings context drawer content
    pub fn settings_view(&self) -> context_drawer::ContextDrawer<'_, Message> {
        let section = widget::settings::section()
            .title(fl!("settings-scanning"))
            .add(
                widget::settings::item::builder(fl!("confirm-before-print"))
                    .description(fl!("confirm-before-print-description"))
                    .toggler(
                        self.config.confirm_before_print,
                        Message::ToggleConfirmBeforePrint,
                    ),
            );

        context_drawer::context_drawer(
            widget::column().push(section),
            Message::ToggleContextPage(ContextPage::Settings),
        )
        .title(fl!("settings"))
    }
}
