use concat_string::concat_string;
use dominator::{clone, Dom, html};
use futures::future::{FutureExt, LocalBoxFuture};
use futures_signals::signal::{Mutable, SignalExt};
use std::{future::Future, rc::Rc};
use wasm_bindgen_futures::spawn_local;
use model::UserData;

use crate::{error::FetchError, fetch::get_user, loader::AsyncLoader};

/// Where the component gets its record from
pub trait UserSource {
    fn fetch_user(&self) -> LocalBoxFuture<'static, Result<UserData, FetchError>>;
}

pub struct HttpUserSource {
    url: &'static str,
}

impl HttpUserSource {
    pub fn new(url: &'static str) -> Rc<Self> {
        Rc::new(Self { url })
    }
}

impl UserSource for HttpUserSource {
    fn fetch_user(&self) -> LocalBoxFuture<'static, Result<UserData, FetchError>> {
        let url = self.url;
        async move { get_user(url).await }.boxed_local()
    }
}

/// Failures other than cancellation end up here
pub trait Diagnostics {
    fn report(&self, error: &FetchError);
}

pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, error: &FetchError) {
        log::error!("Error fetching data: {}", error);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settled {
    Stored,
    Discarded,
    Cancelled,
    Failed,
}

pub struct UserCpn {
    source: Rc<dyn UserSource>,
    diagnostics: Rc<dyn Diagnostics>,

    active: Mutable<bool>,
    loader: AsyncLoader,
    user_data: Mutable<Option<Rc<UserData>>>,
}

impl UserCpn {
    pub fn new(source: Rc<dyn UserSource>, diagnostics: Rc<dyn Diagnostics>) -> Rc<Self> {
        Rc::new(Self {
            source,
            diagnostics,
            active: Mutable::new(true),
            loader: AsyncLoader::new(),
            user_data: Mutable::new(None),
        })
    }

    pub fn user_data(&self) -> Option<Rc<UserData>> {
        self.user_data.get_cloned()
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Mark active and start the fetch. The returned task resolves early
    /// once [`UserCpn::on_removed`] aborts it.
    pub fn mount(page: &Rc<Self>) -> impl Future<Output = ()> + 'static {
        page.active.set(true);
        let request = page.source.fetch_user();
        page.loader.task(clone!(page => async move {
            let result = request.await;
            page.settle(result);
        }))
    }

    pub fn on_display(page: &Rc<Self>) {
        spawn_local(Self::mount(page));
    }

    /// `true` when an outstanding request was told to abort
    pub fn on_removed(&self) -> bool {
        self.active.set(false);
        let cancelled = self.loader.cancel();
        if cancelled {
            log::debug!("user card removed while loading, request cancelled");
        }
        cancelled
    }

    /// Abort may arrive after the response, so the flag is checked again here
    pub fn settle(&self, result: Result<UserData, FetchError>) -> Settled {
        match result {
            Ok(user) if self.active.get() => {
                self.user_data.set(Some(Rc::new(user)));
                Settled::Stored
            }
            Ok(user) => {
                log::debug!("drop response for {}, user card already removed", user.name);
                Settled::Discarded
            }
            Err(e) if e.is_cancelled() => Settled::Cancelled,
            Err(e) if !self.active.get() => {
                log::debug!("drop failure after user card removed: {}", e);
                Settled::Discarded
            }
            Err(e) => {
                self.diagnostics.report(&e);
                Settled::Failed
            }
        }
    }

    pub fn render(page: Rc<Self>) -> Dom {
        html!("div", {
            .class("user-card")
            .attr_signal("aria-busy", page.loader.is_loading().map(|loading| {
                if loading {"true"} else {"false"}
            }))
            .after_inserted(clone!(page => move |_| {
                Self::on_display(&page);
            }))
            .after_removed(clone!(page => move |_| {
                page.on_removed();
            }))
            .child_signal(page.user_data.signal_cloned().map(|opt| {
                Some(match opt {
                    Some(user) => populated(&user),
                    None => loading(),
                })
            }))
        })
    }
}

pub const LOADING_TEXT: &str = "Loading...";
pub const HEADING_TEXT: &str = "User Data";

/// text of the card top to bottom, placeholder while `user` is absent
pub fn view_lines(user: Option<&UserData>) -> Vec<String> {
    match user {
        Some(user) => vec![String::from(HEADING_TEXT), name_text(user), email_text(user)],
        None => vec![String::from(LOADING_TEXT)],
    }
}

pub fn name_text(user: &UserData) -> String {
    concat_string!("Name: ", user.name)
}

pub fn email_text(user: &UserData) -> String {
    concat_string!("Email: ", user.email)
}

fn loading() -> Dom {
    html!("div", {
        .text(LOADING_TEXT)
    })
}

fn populated(user: &UserData) -> Dom {
    html!("div", {
        .children(&mut [
            html!("h1", { .text(HEADING_TEXT) }),
            html!("p", { .text(&name_text(user)) }),
            html!("p", { .text(&email_text(user)) }),
        ])
    })
}
