use std::sync::Arc;

use flume::Receiver;
use ratatui::Frame;
use tokio::runtime::Handle;
use tracing::{info, warn};

use crate::{
    audio::{AudioConfig, AudioEngine, timer::TokioScheduler},
    nav::{
        JsonFileStorage, MemoryStorage, NavigationState, NavigationStore, PreferenceStorage,
        Screen,
    },
    ui::{context::AppContext, layout::AppLayout, router::Router},
};

use super::{tui, util::handler::EventHandler};

pub struct App {
    pub ctx: AppContext,
    pub router: Router,
    pub state_rx: Receiver<NavigationState>,
    /// Screen the router last entered.
    pub last_screen: Screen,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    /// Must be called from inside the tokio runtime that drives the music.
    pub fn new() -> color_eyre::Result<Self> {
        let storage: Box<dyn PreferenceStorage> = match JsonFileStorage::default_location() {
            Ok(storage) => {
                info!(path = %storage.path().display(), "preferences_file");
                Box::new(storage)
            }
            Err(e) => {
                warn!("No preferences location, keeping settings in memory: {}", e);
                Box::new(MemoryStorage::new())
            }
        };
        let mut store = NavigationStore::new(storage);
        let state_rx = store.subscribe();

        let config = AudioConfig::from_env();
        let synth_rate = config.sample_rate;
        let audio = AudioEngine::create(config, Arc::new(TokioScheduler::new(Handle::current())));
        audio.sync(store.state());

        let last_screen = store.state().current_screen;
        Ok(Self {
            ctx: AppContext::new(store, audio, synth_rate),
            router: Router::new(),
            state_rx,
            last_screen,
            has_focus: true,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?.mouse(true);
        tui.enter()?;

        while !self.should_quit {
            tui.draw(|f| {
                self.ui(f);
            })?;

            EventHandler::handle_events(self, &mut tui).await?;
        }

        self.ctx.audio.stop();
        tui.exit()?;
        Ok(())
    }

    /// Lets the view of a newly current screen know where the user came
    /// from.
    pub fn follow_screen(&mut self) {
        let current = self.ctx.store.state().current_screen;
        if current != self.last_screen {
            self.router.enter(current, self.last_screen);
            self.last_screen = current;
        }
    }

    fn ui(&mut self, frame: &mut Frame) {
        if self.has_focus {
            let area = frame.area();
            AppLayout::new(self).render(frame, area);
        }
    }
}
