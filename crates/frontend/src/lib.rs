mod abort;
mod fetch;
mod loader;

pub mod error;
pub mod user;

use dominator::{clone, Dom, events, html};
use futures_signals::signal::{Mutable, SignalExt};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlButtonElement, window};

use user::{HttpUserSource, LogDiagnostics, UserCpn};

const USER_URL: &str = "/api/user";

struct App {
    show_user: Mutable<bool>,
}

impl App {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            show_user: Mutable::new(true),
        })
    }

    fn render(app: Rc<Self>) -> Dom {
        html!("div", {
            .class(["container","mt-3"])
            .child(html!("button" => HtmlButtonElement, {
                .attr("type","button")
                .class(["btn","btn-sm","btn-primary","mb-2"])
                .text_signal(app.show_user.signal().map(|show| {
                    if show {"Hide"} else {"Show"}
                }))
                .event(clone!(app => move |_: events::Click| {
                    app.show_user.replace_with(|show| !*show);
                }))
            }))
            // every show builds a new card, hiding removes it
            .child_signal(app.show_user.signal().map(|show| {
                show.then(|| {
                    UserCpn::render(UserCpn::new(HttpUserSource::new(USER_URL), Rc::new(LogDiagnostics)))
                })
            }))
        })
    }

    fn get_id(&self, id: &str) -> Option<Element> {
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
    }
}

#[wasm_bindgen(start)]
pub fn main_js() {
    wasm_logger::init(wasm_logger::Config::default());
    console_error_panic_hook::set_once();
    log::info!("wasm logging enabled");

    let app = App::new();
    if let Some(elm) = app.get_id("app") {
        dominator::append_dom(&elm, App::render(app));
    } else {
        log::error!("element #app not found");
    }
}
