use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    HandlerResponse, Keybindings, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokewish::action::Action;
use pokewish::config::{self, AppConfig};
use pokewish::effect::Effect;
use pokewish::reducer::reducer;
use pokewish::state::{AppState, TICK_MS};
use pokewish::storage::{self, FileStore};
use pokewish::ui::{WishComponentId, WishContext, WishUi};
use pokewish::wishlist::WishlistFilter;
use pokewish::{api, logging};

#[derive(Parser, Debug)]
#[command(name = "pokewish")]
#[command(about = "Pokémon wishlist with a paginated catalog")]
struct Args {
    /// Where the wishlist is stored
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Where API responses are cached
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    #[arg(long, default_value = config::DEFAULT_API_BASE)]
    api_base: String,

    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Always hit the network
    #[arg(long)]
    no_cache: bool,

    /// -v debug, -vv trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    debug: DebugCliArgs,
}

impl Args {
    fn app_config(&self) -> AppConfig {
        let data_dir = self.data_dir.clone().unwrap_or_else(config::default_data_dir);
        let cache_dir = if self.no_cache {
            None
        } else {
            Some(self.cache_dir.clone().unwrap_or_else(config::default_cache_dir))
        };
        AppConfig {
            api_base: self.api_base.clone(),
            log_file: self
                .log_file
                .clone()
                .unwrap_or_else(|| config::default_log_file(&data_dir)),
            data_dir,
            cache_dir,
        }
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let app_config = config::install(args.app_config());
    logging::init_logging(args.verbose, &app_config.log_file)?;
    tracing::info!(data_dir = %app_config.data_dir.display(), "starting pokewish");

    let debug = DebugSession::new(args.debug);

    let state = debug
        .load_state_or_else_async(|| async {
            let mut store = FileStore::new(&app_config.data_dir);
            let boot = storage::bootstrap(&mut store);
            Ok::<AppState, io::Error>(AppState::new(boot.wishlist, boot.catalog_autoload))
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

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
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    tracing::info!("bye");
    Ok(())
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
    let ui = Rc::new(RefCell::new(WishUi::new()));
    let mut bus: EventBus<AppState, Action, WishComponentId, WishContext> = EventBus::new();
    let keybindings: Keybindings<WishContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(WishComponentId::Wishlist, move |event, state| {
        ui_list
            .borrow_mut()
            .handle_wishlist_event(&event.kind, state)
    });

    let ui_catalog = Rc::clone(&ui);
    bus.register(WishComponentId::Catalog, move |event, state| {
        ui_catalog
            .borrow_mut()
            .handle_catalog_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(WishComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    bus.register_global(|event, state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(_) if state.search.active => HandlerResponse::ignored(),
        EventKind::Key(key) => match key.code {
            KeyCode::Char('q') => HandlerResponse::action(Action::Quit),
            KeyCode::Tab | KeyCode::BackTab => HandlerResponse::action(Action::FocusNext),
            KeyCode::Char('/') => HandlerResponse::action(Action::SearchStart),
            KeyCode::Char('1') => HandlerResponse::action(Action::FilterSet(WishlistFilter::All)),
            KeyCode::Char('2') => {
                HandlerResponse::action(Action::FilterSet(WishlistFilter::Captured))
            }
            KeyCode::Char('3') => {
                HandlerResponse::action(Action::FilterSet(WishlistFilter::Pending))
            }
            KeyCode::Char('f') => HandlerResponse::action(Action::FilterNext),
            KeyCode::Char('+') => HandlerResponse::action(Action::SearchAddResult),
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(TICK_MS),
                    || Action::Tick,
                );
            },
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

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::SearchPokemon { query } => {
            ctx.tasks().spawn(TaskKey::new("search"), async move {
                match api::fetch_pokemon(&query).await {
                    Ok(entry) => Action::SearchDidLoad(entry),
                    Err(error) => {
                        tracing::warn!(%query, %error, "search failed");
                        Action::SearchDidError(error)
                    }
                }
            });
        }
        Effect::LoadCard { id } => {
            let key = format!("card_{id}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_pokemon(&id.to_string()).await {
                    Ok(entry) => Action::CardDidLoad { id, entry },
                    Err(error) => {
                        tracing::warn!(id, %error, "card failed to load");
                        Action::CardDidError { id, error }
                    }
                }
            });
        }
        Effect::PersistWishlist(wishlist) => {
            let store = FileStore::new(&config::current().data_dir);
            ctx.tasks().spawn(TaskKey::new("persist_wishlist"), async move {
                match storage::save_wishlist(&store, &wishlist).await {
                    Ok(()) => Action::PersistDidComplete,
                    Err(error) => {
                        tracing::warn!(%error, "failed to persist wishlist");
                        Action::PersistDidError(error)
                    }
                }
            });
        }
    }
}
