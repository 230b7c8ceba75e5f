//! App shell: store wiring, socket lifecycle and top-level layout.
//!
//! # Design
//! - Every user action updates the store optimistically, then queues its
//!   command on the socket handle; server updates overwrite the result.
//! - Inbound events run registered listeners first, then reduce into the store.

mod preferences;

use crate::app::preferences::{BrowserStore, apply_theme, load_config, now_timestamp};
use crate::components::navbar::Navbar;
use crate::components::toast::ToastHost;
use crate::core::connection::ConnectionState;
use crate::core::listeners::Listeners;
use crate::core::preferences::{CONTRACT_KEY, PreferenceStore};
use crate::core::store::{AppStore, apply_server_event};
use crate::core::theme::ThemePreference;
use crate::core::ui::SAVE_NOTICE_MS;
use crate::features::job::state::{begin_submit, end_submit, reset_job};
use crate::features::job::view::JobPanel;
use crate::features::settings::state::{
    close_modal, edit, hide_notice, open_modal, populate, show_notice, to_record,
};
use crate::features::settings::view::SettingsModal;
use crate::features::toasts::state::{begin_hide, remove};
use crate::features::wanted::state::{
    begin_fetch, reset_fetch, selected_items, stop_fetch, toggle_all, toggle_item,
};
use crate::features::wanted::view::WantedPanel;
use crate::services::socket::{SocketHandle, connect_socket};
use bookbounty_events::{Command, InboundKind, ServerEvent};
use gloo::console;
use gloo::timers::callback::Timeout;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

type EventListeners = Listeners<Callback<ServerEvent>>;

#[function_component(BookBountyApp)]
fn bookbounty_app() -> Html {
    let dispatch = Dispatch::<AppStore>::new();
    let config = use_memo(|_| load_config(), ());
    let socket = use_state(|| None as Option<SocketHandle>);
    let listeners = use_mut_ref(EventListeners::default);
    let notice_timer = use_mut_ref(|| None as Option<Timeout>);

    let wanted = use_selector(|store: &AppStore| store.wanted.clone());
    let job = use_selector(|store: &AppStore| store.job.clone());
    let settings = use_selector(|store: &AppStore| store.settings.clone());
    let toasts = use_selector(|store: &AppStore| store.toasts.items.clone());
    let theme = use_selector(|store: &AppStore| store.theme);
    let connection = use_selector(|store: &AppStore| store.connection);

    {
        let dispatch = dispatch.clone();
        let contract = config.contract;
        use_effect_with_deps(
            move |_| {
                let mut storage = BrowserStore;
                storage.set(CONTRACT_KEY, contract.as_str());
                let theme = ThemePreference::load(&storage);
                dispatch.set(AppStore::init(contract, theme));
                || ()
            },
            (),
        );
    }

    use_effect_with_deps(
        |mode| {
            apply_theme(*mode);
            || ()
        },
        theme.mode,
    );

    {
        let dispatch = dispatch.clone();
        let listeners = listeners.clone();
        let socket = socket.clone();
        let config = (*config).clone();
        use_effect_with_deps(
            move |_| {
                let on_event = {
                    let dispatch = dispatch.clone();
                    Callback::from(move |event: ServerEvent| {
                        let handlers = listeners.borrow_mut().take_for(event.kind());
                        for handler in handlers {
                            handler.emit(event.clone());
                        }
                        let timestamp = now_timestamp();
                        dispatch.reduce_mut(|store| {
                            apply_server_event(store, event, timestamp);
                        });
                    })
                };
                let on_state = Callback::from(move |state: ConnectionState| {
                    dispatch.reduce_mut(|store| {
                        store.connection = state;
                    });
                });
                let handle = connect_socket(config, on_event, on_state);
                socket.set(Some(handle.clone()));
                move || handle.close()
            },
            (),
        );
    }

    let emit = {
        let socket = socket.clone();
        Callback::from(move |command: Command| match (*socket).as_ref() {
            Some(handle) => handle.emit(command),
            None => console::warn!("socket not started; command dropped"),
        })
    };

    let on_fetch = {
        let dispatch = dispatch.clone();
        let emit = emit.clone();
        Callback::from(move |()| {
            dispatch.reduce_mut(|store| begin_fetch(&mut store.wanted));
            emit.emit(Command::FetchWanted);
        })
    };
    let on_stop_wanted = {
        let dispatch = dispatch.clone();
        let emit = emit.clone();
        Callback::from(move |()| {
            emit.emit(Command::StopWanted);
            dispatch.reduce_mut(|store| stop_fetch(&mut store.wanted));
        })
    };
    let on_reset_wanted = {
        let dispatch = dispatch.clone();
        let emit = emit.clone();
        Callback::from(move |()| {
            emit.emit(Command::ResetWanted);
            dispatch.reduce_mut(|store| reset_fetch(&mut store.wanted));
        })
    };
    let on_toggle_all = {
        let dispatch = dispatch.clone();
        Callback::from(move |checked: bool| {
            dispatch.reduce_mut(|store| toggle_all(&mut store.wanted, checked));
        })
    };
    let on_toggle_item = {
        let dispatch = dispatch.clone();
        Callback::from(move |(index, checked): (usize, bool)| {
            dispatch.reduce_mut(|store| toggle_item(&mut store.wanted, index, checked));
        })
    };
    let on_submit = {
        let dispatch = dispatch.clone();
        let emit = emit.clone();
        Callback::from(move |()| {
            let selection = selected_items(&dispatch.get().wanted);
            dispatch.reduce_mut(|store| begin_submit(&mut store.job));
            emit.emit(Command::SubmitSelection(selection));
            dispatch.reduce_mut(|store| end_submit(&mut store.job));
        })
    };

    let on_stop_job = {
        let emit = emit.clone();
        Callback::from(move |()| emit.emit(Command::StopDownloads))
    };
    let on_reset_job = {
        let dispatch = dispatch.clone();
        let emit = emit.clone();
        Callback::from(move |()| {
            emit.emit(Command::ResetDownloads);
            dispatch.reduce_mut(|store| reset_job(&mut store.job));
        })
    };

    let on_open_settings = {
        let dispatch = dispatch.clone();
        let emit = emit.clone();
        Callback::from(move |()| {
            dispatch.reduce_mut(|store| open_modal(&mut store.settings));
            let mut listeners = listeners.borrow_mut();
            if listeners.count(InboundKind::SettingsLoaded) == 0 {
                let dispatch = dispatch.clone();
                listeners.once(
                    InboundKind::SettingsLoaded,
                    Callback::from(move |event: ServerEvent| {
                        if let ServerEvent::SettingsLoaded(record) = event {
                            dispatch.reduce_mut(|store| populate(&mut store.settings, &record));
                        }
                    }),
                );
            }
            drop(listeners);
            emit.emit(Command::LoadSettings);
        })
    };
    let on_close_settings = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| {
            dispatch.reduce_mut(|store| close_modal(&mut store.settings));
        })
    };
    let on_edit_setting = {
        let dispatch = dispatch.clone();
        Callback::from(move |(key, value): (&'static str, String)| {
            dispatch.reduce_mut(|store| edit(&mut store.settings, key, value));
        })
    };
    let on_save_settings = {
        let dispatch = dispatch.clone();
        let emit = emit.clone();
        Callback::from(move |()| {
            let record = to_record(&dispatch.get().settings);
            emit.emit(Command::SaveSettings(record));
            dispatch.reduce_mut(|store| {
                show_notice(&mut store.settings);
            });
            let Some(token) = dispatch.get().settings.notice else {
                return;
            };
            let hide = {
                let dispatch = dispatch.clone();
                move || dispatch.reduce_mut(|store| hide_notice(&mut store.settings, token))
            };
            *notice_timer.borrow_mut() = Some(Timeout::new(SAVE_NOTICE_MS, hide));
        })
    };

    let on_toggle_theme = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| {
            dispatch.reduce_mut(|store| store.theme.toggle(&mut BrowserStore));
        })
    };
    let on_hide_toast = {
        let dispatch = dispatch.clone();
        Callback::from(move |id: u64| {
            dispatch.reduce_mut(|store| {
                begin_hide(&mut store.toasts, id);
            });
        })
    };
    let on_remove_toast = Callback::from(move |id: u64| {
        dispatch.reduce_mut(|store| remove(&mut store.toasts, id));
    });

    html! {
        <>
            <Navbar
                switch_on={theme.switch_on}
                connection={*connection}
                on_toggle_theme={on_toggle_theme}
                on_open_settings={on_open_settings}
            />
            <main class="container-fluid">
                <div class="row">
                    <div class="col-lg-6">
                        <WantedPanel
                            state={(*wanted).clone()}
                            submitting={job.submitting}
                            on_fetch={on_fetch}
                            on_stop={on_stop_wanted}
                            on_reset={on_reset_wanted}
                            on_toggle_all={on_toggle_all}
                            on_toggle_item={on_toggle_item}
                            on_submit={on_submit}
                        />
                    </div>
                    <div class="col-lg-6">
                        <JobPanel state={(*job).clone()} on_stop={on_stop_job} on_reset={on_reset_job} />
                    </div>
                </div>
            </main>
            <SettingsModal
                state={(*settings).clone()}
                on_close={on_close_settings}
                on_edit={on_edit_setting}
                on_save={on_save_settings}
            />
            <ToastHost toasts={(*toasts).clone()} on_hide={on_hide_toast} on_remove={on_remove_toast} />
        </>
    }
}

/// Mount the dashboard on `#root`, or on `<body>` when there is none.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<BookBountyApp>::with_root(root).render();
    } else {
        yew::Renderer::<BookBountyApp>::new().render();
    }
}
