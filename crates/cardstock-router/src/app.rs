//! Application wiring: the route table, the dispatcher, and bootstrap.

use crate::guard::{Flow, Guard, RouteContext};
use crate::guards::{
    reset_transient, CardProfile, EditDeckSettings, EnsureCard, EnsureCardsList, EnsureDeck,
    GoDefault, Hold, NewCard, ShowCards, ShowDecks,
};
use crate::nav::{Navigator, Transition};
use crate::{Location, RouteError, RoutePattern, RouteResult};
use cardstock_gateway::Gateway;
use cardstock_model::{paths, Breadcrumb, Deck, DeckId};
use cardstock_state::{StateError, StateTree};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};

/// Upper bound on chained redirects per navigation.
///
/// Canonicalization needs at most a few hops (default route → deck →
/// slugged deck); anything deeper is a wiring bug surfaced as
/// [`RouteError::RedirectLoop`].
const MAX_REDIRECTS: usize = 8;

struct Route {
    pattern: RoutePattern,
    chain: Vec<Arc<dyn Guard>>,
}

enum ChainOutcome {
    Accepted,
    Redirect(String),
    ToRoot,
}

/// The assembled client application.
///
/// Owns the route table and the two injected collaborators every guard
/// sees: the shared state tree and the REST gateway.
pub struct App {
    state: Arc<StateTree>,
    gateway: Arc<dyn Gateway>,
    routes: Vec<Route>,
    transitions_tx: mpsc::UnboundedSender<Transition>,
    transitions_rx: Mutex<Option<mpsc::UnboundedReceiver<Transition>>>,
    location: watch::Sender<String>,
}

impl App {
    /// Assemble the application around its injected collaborators.
    pub fn new(state: Arc<StateTree>, gateway: Arc<dyn Gateway>) -> Arc<Self> {
        let (transitions_tx, transitions_rx) = mpsc::unbounded_channel();
        let (location, _) = watch::channel("/".to_string());
        Arc::new(Self {
            state,
            gateway,
            routes: route_table(),
            transitions_tx,
            transitions_rx: Mutex::new(Some(transitions_rx)),
            location,
        })
    }

    /// A navigation facade feeding this application's dispatcher.
    pub fn navigator(&self) -> Navigator {
        Navigator::new(self.state.clone(), self.transitions_tx.clone())
    }

    /// The shared state tree.
    pub fn state(&self) -> &Arc<StateTree> {
        &self.state
    }

    /// The last accepted location.
    pub fn location(&self) -> String {
        self.location.borrow().clone()
    }

    /// Watch accepted locations as they change.
    pub fn watch_location(&self) -> watch::Receiver<String> {
        self.location.subscribe()
    }

    /// Launch the two startup tasks: the dispatcher (starting at `initial`)
    /// and the deck seeding (breadcrumb subscriber + root deck id).
    ///
    /// Both run concurrently; uncaught failures are logged and not retried.
    pub fn bootstrap(self: Arc<Self>, initial: impl Into<String>) {
        let initial = initial.into();

        let app = self.clone();
        tokio::spawn(async move {
            if let Err(err) = app.run_dispatcher(initial).await {
                tracing::error!(error = %err, "dispatcher stopped");
            }
        });

        tokio::spawn(async move {
            if let Err(err) = self.seed_decks().await {
                tracing::error!(error = %err, "deck bootstrap failed");
            }
        });
    }

    /// Dispatch one navigation to completion.
    ///
    /// Runs the matched chain, following redirects until a location is
    /// accepted. Fatal errors propagate; recoverable conditions have
    /// already been folded into redirects by the guards.
    pub async fn dispatch(&self, target: &str) -> RouteResult<Location> {
        let mut location = Location::parse(target);
        for _ in 0..MAX_REDIRECTS {
            reset_transient(&self.state)?;
            match self.run_chain(&location).await? {
                ChainOutcome::Accepted => {
                    // send_replace: the value must land even with no watchers
                    self.location.send_replace(location.to_string());
                    return Ok(location);
                }
                ChainOutcome::Redirect(next) => {
                    tracing::debug!(from = %location, to = %next, "redirecting");
                    location = Location::parse(&next);
                }
                ChainOutcome::ToRoot => {
                    // waits for the root deck id when it has not loaded yet
                    let root: DeckId = self.state.first_value_as(&paths::root()).await?;
                    location = Location::parse(&format!("/deck/{root}"));
                }
            }
        }
        Err(RouteError::RedirectLoop {
            location: location.to_string(),
        })
    }

    async fn run_chain(&self, location: &Location) -> RouteResult<ChainOutcome> {
        let Some((params, chain)) = self
            .routes
            .iter()
            .find_map(|route| route.pattern.matches(location).map(|p| (p, &route.chain)))
        else {
            // nothing matches: this layer has no browser to fall back to
            return Ok(ChainOutcome::ToRoot);
        };

        let ctx = RouteContext {
            params,
            location: location.clone(),
            state: self.state.clone(),
            gateway: self.gateway.clone(),
        };
        for guard in chain {
            match guard.run(&ctx).await? {
                Flow::Next => continue,
                Flow::Stop => break,
                Flow::Redirect(next) => return Ok(ChainOutcome::Redirect(next)),
                Flow::ToRoot => return Ok(ChainOutcome::ToRoot),
            }
        }
        Ok(ChainOutcome::Accepted)
    }

    /// Dispatch the initial location, then serve pushed transitions until
    /// every navigator clone is gone.
    ///
    /// A failed navigation is logged and abandoned; the dispatcher keeps
    /// serving subsequent transitions.
    async fn run_dispatcher(self: Arc<Self>, initial: String) -> RouteResult<()> {
        let mut transitions = self
            .transitions_rx
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| RouteError::contract("dispatcher already started"))?;

        if let Err(err) = self.dispatch(&initial).await {
            tracing::error!(error = %err, location = %initial, "navigation failed");
        }
        while let Some(transition) = transitions.recv().await {
            tracing::debug!(
                location = %transition.location,
                replace = transition.replace,
                "navigating"
            );
            if let Err(err) = self.dispatch(&transition.location).await {
                tracing::error!(error = %err, location = %transition.location, "navigation failed");
            }
        }
        Ok(())
    }

    /// Install the breadcrumb subscriber, then fetch and cache the root
    /// deck id.
    async fn seed_decks(self: Arc<Self>) -> RouteResult<()> {
        let app = self.clone();
        tokio::spawn(async move {
            if let Err(err) = app.maintain_breadcrumb().await {
                tracing::error!(error = %err, "breadcrumb maintenance failed");
            }
        });

        let root = self.gateway.root_deck().await?;
        self.state.set(&paths::root(), root)?;
        Ok(())
    }

    /// Keep `deck.breadcrumb` consistent with `deck.self` for the app's
    /// lifetime.
    ///
    /// Seeds the trail from the ancestor chain of the first current deck
    /// (waiting for one if none is cached yet), then on every deck write:
    /// same id replaces the tail element in place, a new id rebuilds the
    /// trail from a fresh ancestor fetch. Updates race navigation like any
    /// other background fetch here.
    async fn maintain_breadcrumb(&self) -> RouteResult<()> {
        let current: Deck = self.state.first_value_as(&paths::deck_self()).await?;
        // subscribe before seeding so a deck written during the ancestor
        // fetch still reaches the maintenance loop
        let mut updates = self.state.observe(&paths::deck_self());

        let mut crumb = self.ancestors_or_empty(current.id).await;
        crumb.push(current);
        self.state.set_as(&paths::deck_breadcrumb(), &crumb)?;

        while let Some(value) = updates.recv().await {
            let updated: Deck = serde_json::from_value(value).map_err(StateError::from)?;
            let Some(mut crumb) = self
                .state
                .get_as::<Breadcrumb>(&paths::deck_breadcrumb())?
            else {
                continue;
            };
            match crumb.last().map(|deck| deck.id) {
                None => continue,
                Some(tail_id) if tail_id == updated.id => {
                    let tail = crumb.len() - 1;
                    crumb[tail] = updated;
                }
                Some(_) => {
                    crumb = self.ancestors_or_empty(updated.id).await;
                    crumb.push(updated);
                }
            }
            self.state.set_as(&paths::deck_breadcrumb(), &crumb)?;
        }
        Ok(())
    }

    /// Ancestor chain for a deck; failures degrade to an empty chain so the
    /// maintenance loop outlives backend hiccups.
    async fn ancestors_or_empty(&self, id: DeckId) -> Vec<Deck> {
        match self.gateway.ancestors(id).await {
            Ok(chain) => chain,
            Err(err) => {
                tracing::warn!(error = %err, deck = id, "ancestor fetch failed");
                Vec::new()
            }
        }
    }
}

/// The hash-route surface, first registered match wins.
fn route_table() -> Vec<Route> {
    let ensure_deck: Arc<dyn Guard> = Arc::new(EnsureDeck);

    let route = |pattern: &'static str, chain: Vec<Arc<dyn Guard>>| Route {
        pattern: RoutePattern::parse(pattern),
        chain,
    };

    vec![
        route("/", vec![Arc::new(GoDefault)]),
        route("/deck/:id", vec![ensure_deck.clone(), Arc::new(GoDefault)]),
        route(
            "/deck/:id/:slug",
            vec![ensure_deck.clone(), Arc::new(ShowDecks)],
        ),
        route(
            "/deck/:id/:slug/settings",
            vec![ensure_deck.clone(), Arc::new(EditDeckSettings)],
        ),
        route(
            "/deck/:id/:slug/cards",
            vec![
                ensure_deck.clone(),
                Arc::new(EnsureCardsList),
                Arc::new(ShowCards),
            ],
        ),
        route(
            "/deck/:id/:slug/cards/new",
            vec![ensure_deck, Arc::new(NewCard)],
        ),
        route("/card/:id", vec![Arc::new(EnsureCard), Arc::new(CardProfile)]),
        route("/card/:id/edit", vec![Arc::new(Hold)]),
        route("/review", vec![Arc::new(Hold)]),
        route("/review/deck/:id", vec![Arc::new(Hold)]),
    ]
}
