use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use super::data::*;

pub type AuthListener = Box<dyn Fn(&AuthState) + Send + Sync>;

/// The external sign-in provider. The app never sees credentials, only the
/// state changes it pushes to listeners.
pub trait AuthClient: Send + Sync {
    fn on_auth_state_changed(&self, listener: AuthListener) -> Subscription;

    /// Starts the provider's own sign-in flow.
    fn login(&self);
}

/// Handle returned by `on_auth_state_changed`. Unsubscribes when dropped.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + Send + Sync + 'static) -> Subscription {
        Subscription {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

type SharedListener = Arc<dyn Fn(&AuthState) + Send + Sync>;

struct StaticAuthInner {
    state: AuthState,
    login_as: Option<User>,
    announce: bool,
    subscribers: HashMap<u64, SharedListener>,
    next_id: u64,
}

/// In-process provider driven by configuration instead of a real sign-in service.
#[derive(Clone)]
pub struct StaticAuth {
    inner: Arc<Mutex<StaticAuthInner>>,
}

impl StaticAuth {
    fn with(state: AuthState, login_as: Option<User>, announce: bool) -> StaticAuth {
        StaticAuth {
            inner: Arc::new(Mutex::new(StaticAuthInner {
                state,
                login_as,
                announce,
                subscribers: HashMap::new(),
                next_id: 0,
            })),
        }
    }

    pub fn signed_in(user: User) -> StaticAuth {
        let login_as = Some(user.clone());
        StaticAuth::with(AuthState::resolved(Some(user)), login_as, true)
    }

    /// `login` signs `login_as` in, if there is one.
    pub fn signed_out(login_as: Option<User>) -> StaticAuth {
        StaticAuth::with(AuthState::resolved(None), login_as, true)
    }

    /// Never reports anything until `set_state` is called.
    pub fn pending() -> StaticAuth {
        StaticAuth::with(AuthState::loading(), None, false)
    }

    pub fn set_state(&self, state: AuthState) {
        let listeners = match self.inner.lock() {
            Ok(mut inner) => {
                inner.state = state.clone();
                inner.announce = true;
                inner.subscribers.values().cloned().collect::<Vec<SharedListener>>()
            }
            Err(e) => {
                tracing::error!(error = %e, "auth provider lock poisoned");
                return;
            }
        };

        for listener in listeners {
            listener(&state);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().map(|inner| inner.subscribers.len()).unwrap_or(0)
    }
}

impl AuthClient for StaticAuth {
    fn on_auth_state_changed(&self, listener: AuthListener) -> Subscription {
        let listener: SharedListener = Arc::from(listener);

        let (id, current) = match self.inner.lock() {
            Ok(mut inner) => {
                let id = inner.next_id;
                inner.next_id += 1;
                inner.subscribers.insert(id, listener.clone());
                let current = if inner.announce {
                    Some(inner.state.clone())
                } else {
                    None
                };
                (id, current)
            }
            Err(e) => {
                tracing::error!(error = %e, "auth provider lock poisoned");
                return Subscription::new(|| {});
            }
        };

        if let Some(state) = current {
            listener(&state);
        }

        let inner = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                if let Ok(mut inner) = inner.lock() {
                    inner.subscribers.remove(&id);
                }
            }
        })
    }

    fn login(&self) {
        let login_as = self.inner.lock().ok().and_then(|inner| inner.login_as.clone());

        match login_as {
            Some(user) => {
                tracing::info!(user = %user.id, "signing in");
                self.set_state(AuthState::resolved(Some(user)));
            }
            None => tracing::warn!("sign-in requested but no user is configured"),
        }
    }
}

/// Keeps the latest state pushed by the provider. Starts out loading and
/// stays there until the provider reports.
pub struct AuthGate {
    state: Arc<RwLock<AuthState>>,
    client: Arc<dyn AuthClient>,
    _subscription: Subscription,
}

impl AuthGate {
    pub fn connect(client: Arc<dyn AuthClient>) -> AuthGate {
        let state = Arc::new(RwLock::new(AuthState::loading()));

        let sink = state.clone();
        let subscription = client.on_auth_state_changed(Box::new(move |next: &AuthState| {
            if let Ok(mut current) = sink.write() {
                *current = next.clone();
            }
        }));

        AuthGate {
            state,
            client,
            _subscription: subscription,
        }
    }

    pub fn gate(&self) -> Gate {
        match self.state.read() {
            Ok(state) => Gate::from(&*state),
            Err(_) => Gate::Loading,
        }
    }

    pub fn login(&self) {
        self.client.login();
    }
}
