use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    audio::state::EnginePhase,
    nav::MusicLocation,
    ui::{app::App, theme::palette},
};

pub struct AppLayout<'a> {
    pub app: &'a mut App,
}

impl<'a> AppLayout<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn render(self, f: &mut Frame, area: Rect) {
        let state = self.app.ctx.store.snapshot();
        let palette = palette(state.prefs.theme);

        let buf = f.buffer_mut();
        buf.set_style(area, Style::new().bg(palette.background));

        let [header_area, content_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let music = match self.app.ctx.audio.phase() {
            EnginePhase::Locked => "♪ press a key".to_string(),
            EnginePhase::Unavailable => "♪ no audio".to_string(),
            EnginePhase::Ready(_) if !state.prefs.music_enabled => "♪ off".to_string(),
            EnginePhase::Ready(_) => format!(
                "♪ {} · {}",
                match state.music_location {
                    MusicLocation::Menu => "menu",
                    MusicLocation::Portfolio => "portfolio",
                },
                state.prefs.music_volume
            ),
        };

        let title = Line::from(vec![
            Span::styled(
                " GAMEFOLIO ",
                Style::default()
                    .fg(palette.background)
                    .bg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {} ", state.prefs.theme.label()),
                Style::default().fg(palette.accent),
            ),
        ]);
        f.render_widget(Paragraph::new(title), header_area);
        f.render_widget(
            Paragraph::new(format!("{music} "))
                .alignment(Alignment::Right)
                .style(Style::default().fg(palette.secondary)),
            header_area,
        );

        self.app
            .router
            .render(f, content_area, &state, &palette);

        let hints = self.app.router.hints(state.current_screen);
        f.render_widget(
            Paragraph::new(hints)
                .alignment(Alignment::Center)
                .style(Style::default().fg(palette.neutral)),
            footer_area,
        );
    }
}
