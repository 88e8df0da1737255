use ratatui::style::{Color, Modifier, Style};

use crate::model::toast::ToastKind;

/// Color theme for the TUI.
pub struct Theme {
    pub ok: Color,
    pub not_ok: Color,
    pub pending: Color,

    pub header_fg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight_bg: Color,
    pub active: Color,
    pub spinner: Color,
    pub footer_fg: Color,
    pub footer_bg: Color,
}

impl Theme {
    /// Hacker-green terminal theme.
    pub fn hacker() -> Self {
        Self {
            ok: Color::Rgb(0, 210, 0),
            not_ok: Color::Red,
            pending: Color::Yellow,

            header_fg: Color::Black,
            header_bg: Color::Rgb(0, 210, 0),
            border: Color::DarkGray,
            text: Color::White,
            dim: Color::DarkGray,
            highlight_bg: Color::Rgb(30, 50, 30),
            active: Color::Cyan,
            spinner: Color::Cyan,
            footer_fg: Color::DarkGray,
            footer_bg: Color::Reset,
        }
    }

    /// Modern theme: white text, violet accents, dark violet header.
    pub fn modern() -> Self {
        Self {
            ok: Color::Rgb(16, 185, 129),
            not_ok: Color::Rgb(239, 68, 68),
            pending: Color::Rgb(255, 200, 0),

            header_fg: Color::White,
            header_bg: Color::Rgb(109, 40, 217),
            border: Color::Rgb(60, 60, 80),
            text: Color::White,
            dim: Color::Rgb(120, 120, 140),
            highlight_bg: Color::Rgb(46, 16, 101),
            active: Color::Rgb(139, 92, 246),
            spinner: Color::Rgb(139, 92, 246),
            footer_fg: Color::Rgb(120, 120, 140),
            footer_bg: Color::Reset,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "modern" => Self::modern(),
            _ => Self::hacker(),
        }
    }

    pub fn flag_color(&self, ok: bool) -> Color {
        if ok { self.ok } else { self.not_ok }
    }

    pub fn toast_color(&self, kind: ToastKind) -> Color {
        match kind {
            ToastKind::Success => self.ok,
            ToastKind::Error => self.not_ok,
            ToastKind::Info => self.dim,
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg).bg(self.footer_bg)
    }
}
