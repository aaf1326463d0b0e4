//! Pure transition function for the top-level view mode.

/// Which top-level view the presentation layer shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Initial mode; also kept after a startup navigation, when the
    /// rendered page owns the window.
    #[default]
    Loading,
    Input,
    Manage,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
    pub mode: Mode,
    /// Last selected url as known to this session. May be stale.
    pub current: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Startup read finished. `known` is whether `last_selected` matches a record.
    Started { last_selected: String, known: bool },
    StartupFailed,
    /// An address was accepted by the store.
    Submitted { url: String },
    /// The address was rejected by the store.
    Rejected { message: String },
    /// An existing record was picked.
    Selected { url: String },
    ShowInput,
    ShowManager,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Navigate(String),
    /// Target is already selected; nothing to load.
    AlreadyCurrent,
    ReportInvalid(String),
}

pub fn transition(state: &State, event: Event) -> (State, Vec<Effect>) {
    let mut next = state.clone();

    let effects = match event {
        Event::Started {
            last_selected,
            known,
        } => {
            next.current = last_selected.clone();
            if known && !last_selected.is_empty() {
                vec![Effect::Navigate(last_selected)]
            } else {
                next.mode = Mode::Input;
                vec![]
            }
        }
        Event::StartupFailed => {
            next.mode = Mode::Input;
            vec![]
        }
        Event::Submitted { url } => {
            next.current = url.clone();
            vec![Effect::Navigate(url)]
        }
        Event::Rejected { message } => vec![Effect::ReportInvalid(message)],
        Event::Selected { url } => {
            if url == state.current {
                vec![Effect::AlreadyCurrent]
            } else {
                next.current = url.clone();
                vec![Effect::Navigate(url)]
            }
        }
        Event::ShowInput => {
            next.mode = Mode::Input;
            vec![]
        }
        Event::ShowManager => {
            next.mode = Mode::Manage;
            vec![]
        }
    };

    (next, effects)
}
