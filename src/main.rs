//! monsterdex - browse monster stats in the terminal

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use monsterdex::action::Action;
use monsterdex::components::{Component, MonsterList, MonsterListProps};
use monsterdex::effect::Effect;
use monsterdex::loader;
use monsterdex::logging;
use monsterdex::monster::Column;
use monsterdex::reducer::reducer;
use monsterdex::state::{AppState, DataSource};
use monsterdex::table::{ITEMS_PER_PAGE, SortOrder, SortSpec};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Sortable, paginated monster stat table
#[derive(Parser, Debug)]
#[command(name = "monsterdex")]
#[command(about = "Browse Dragon Quest Monsters Joker 2 Professional monster stats")]
struct Args {
    /// Monster list JSON file (defaults to the bundled list)
    #[arg(long, short, env = "MONSTERDEX_DATA")]
    data: Option<PathBuf>,

    /// Rows per page (minimum 1)
    #[arg(long, short = 'p', default_value_t = ITEMS_PER_PAGE as u64, value_parser = clap::value_parser!(u64).range(1..))]
    page_size: u64,

    /// Column to sort by at startup (id, name, family, hp, mp, atk, def, agi, wis)
    #[arg(long, short, value_parser = sortable_column)]
    sort: Option<Column>,

    /// Start the --sort column in descending order
    #[arg(long, requires = "sort")]
    descending: bool,

    /// Log file (defaults to monsterdex.log in the user data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum MonsterComponentId {
    List,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum MonsterContext {
    Main,
}

impl EventRoutingState<MonsterComponentId, MonsterContext> for AppState {
    fn focused(&self) -> Option<MonsterComponentId> {
        Some(MonsterComponentId::List)
    }

    fn modal(&self) -> Option<MonsterComponentId> {
        None
    }

    fn binding_context(&self, id: MonsterComponentId) -> MonsterContext {
        match id {
            MonsterComponentId::List => MonsterContext::Main,
        }
    }

    fn default_context(&self) -> MonsterContext {
        MonsterContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        data,
        page_size,
        sort,
        descending,
        log_file,
        debug: debug_args,
    } = Args::parse();

    let _log_guard = logging::init(log_file.as_deref());

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let source = data.map(DataSource::File).unwrap_or_default();
    let page_size = usize::try_from(page_size).unwrap_or(ITEMS_PER_PAGE);
    let initial_sort = sort.map(|column| SortSpec {
        column,
        order: if descending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        },
    });
    let mut state = debug
        .load_state_or_else_async(move || async move {
            let state = AppState::new(source, page_size);
            Ok::<AppState, io::Error>(match initial_sort {
                Some(spec) => state.with_sort(spec),
                None => state,
            })
        })
        .await
        .map_err(debug_error)?;
    // Snapshots may carry a page past the end of their dataset
    state.clamp_page();

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("exiting");
    Ok(())
}

struct MonsterUi {
    list: MonsterList,
}

impl MonsterUi {
    fn new() -> Self {
        Self {
            list: MonsterList::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<MonsterComponentId>,
    ) {
        event_ctx.set_component_area(MonsterComponentId::List, area);

        let props = MonsterListProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.list.render(frame, area, props);
    }

    fn handle_list_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = MonsterListProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.list.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn sortable_column(name: &str) -> Result<Column, String> {
    let column: Column = name.parse().map_err(|e| format!("{e}"))?;
    if column.is_sortable() {
        Ok(column)
    } else {
        Err(format!("column {column} is not sortable"))
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(MonsterUi::new()));
    let mut bus: EventBus<AppState, Action, MonsterComponentId, MonsterContext> = EventBus::new();
    let keybindings: Keybindings<MonsterContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(MonsterComponentId::List, move |event, state| {
        ui_list.borrow_mut().handle_list_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::DatasetLoad),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadDataset { source } => {
            ctx.tasks().spawn("dataset", async move {
                match loader::load_dataset(&source).await {
                    Ok(dataset) => Action::DatasetDidLoad(dataset),
                    Err(e) => {
                        tracing::warn!(%source, error = %e, "dataset load failed");
                        Action::DatasetDidError(e.to_string())
                    }
                }
            });
        }
    }
}
