//! Thành phần giao diện đặt lịch khám cho môi trường WebAssembly.

#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::rc::Rc;

    use crate::styles;
    use agenda_core::date::format_input_date;
    use agenda_core::{
        Appointment, AppointmentId, ConfirmRequest, CurrentUser, PanelAction, PanelConfig,
        PanelSection, PanelState, SectionKind, TimeSlot,
    };
    use chrono::Utc;
    use serde::Deserialize;
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use web_sys::{console, Document, Element, HtmlInputElement, HtmlTextAreaElement, Window};
    use yew::events::InputEvent;
    use yew::prelude::*;
    use yew::TargetCast;

    /// Bọc `PanelState` để dùng với `use_reducer`.
    struct PanelStore {
        state: PanelState,
    }

    impl Reducible for PanelStore {
        type Action = PanelAction;

        fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
            let state = self.state.apply(action);
            if state == self.state {
                return self;
            }
            Rc::new(PanelStore { state })
        }
    }

    #[derive(Properties, PartialEq)]
    pub struct SchedulingPanelProps {
        pub patient_name: String,
        #[prop_or_default]
        pub current_user: Option<CurrentUser>,
        #[prop_or_default]
        pub config: PanelConfig,
    }

    #[function_component(SchedulingPanel)]
    fn scheduling_panel(props: &SchedulingPanelProps) -> Html {
        use_effect_with((), |_| {
            if let Some(window) = web_sys::window() {
                if let Some(document) = window.document() {
                    if let Err(err) = styles::ensure_styles(&document) {
                        console::error_1(&err);
                    }
                }
            }
            || ()
        });

        let store = {
            let config = props.config.clone();
            use_reducer(move || {
                let state = PanelState::new(config).unwrap_or_else(|err| {
                    console::error_1(&JsValue::from_str(&format!("Cấu hình panel lỗi: {err}")));
                    PanelState::default()
                });
                PanelStore { state }
            })
        };
        let dispatcher = store.dispatcher();

        {
            let dispatcher = dispatcher.clone();
            use_effect_with(props.config.clone(), move |config| {
                dispatcher.dispatch(PanelAction::Reconfigure(config.clone()));
                || ()
            });
        }

        let state = &store.state;

        let on_open = {
            let dispatcher = dispatcher.clone();
            Callback::from(move |_: MouseEvent| dispatcher.dispatch(PanelAction::OpenDialog))
        };

        let on_toggle = {
            let dispatcher = dispatcher.clone();
            Callback::from(move |_: Event| dispatcher.dispatch(PanelAction::ToggleShowCancelled))
        };

        let on_cancel_appointment = {
            let dispatcher = dispatcher.clone();
            Callback::from(move |id: AppointmentId| {
                dispatcher.dispatch(PanelAction::CancelAppointment(id))
            })
        };

        html! {
            <div class="agenda-root">
                <header class="agenda-toolbar">
                    <button type="button" class="agenda-primary" onclick={on_open}>
                        {"Agendar consulta"}
                    </button>
                    <label class="agenda-switch">
                        <input
                            type="checkbox"
                            role="switch"
                            checked={state.show_cancelled()}
                            onchange={on_toggle}
                        />
                        <span>{"Ver consultas canceladas"}</span>
                    </label>
                </header>
                {
                    if state.dialog_open() {
                        render_dialog(state, &props.patient_name, props.current_user.clone(), dispatcher)
                    } else {
                        Html::default()
                    }
                }
                { for state.sections().into_iter().map(|section| render_section(section, &on_cancel_appointment)) }
            </div>
        }
    }

    fn render_dialog(
        state: &PanelState,
        patient_name: &str,
        current_user: Option<CurrentUser>,
        dispatcher: UseReducerDispatcher<PanelStore>,
    ) -> Html {
        let form = state.form();
        let date_value = form.date.map(format_input_date).unwrap_or_default();

        let on_reason = {
            let dispatcher = dispatcher.clone();
            Callback::from(move |event: InputEvent| {
                let input: HtmlTextAreaElement = event.target_unchecked_into();
                dispatcher.dispatch(PanelAction::ChangeReason(input.value()));
            })
        };

        let on_date = {
            let dispatcher = dispatcher.clone();
            Callback::from(move |event: InputEvent| {
                let input: HtmlInputElement = event.target_unchecked_into();
                dispatcher.dispatch(PanelAction::ChangeDate(input.value()));
            })
        };

        let on_cancel = {
            let dispatcher = dispatcher.clone();
            Callback::from(move |_: MouseEvent| dispatcher.dispatch(PanelAction::CancelDialog))
        };

        let on_confirm = {
            let dispatcher = dispatcher.clone();
            Callback::from(move |_: MouseEvent| {
                let request = ConfirmRequest::new(Utc::now(), current_user.clone());
                dispatcher.dispatch(PanelAction::Confirm(request));
            })
        };

        html! {
            <div class="agenda-overlay">
                <section class="agenda-dialog" role="dialog" aria-modal="true" aria-labelledby="agenda-dialog-title">
                    <header>
                        <h2 id="agenda-dialog-title">{"Nueva consulta"}</h2>
                        <p class="agenda-dialog-description">
                            { format!("Agenda una consulta médica para {patient_name}.") }
                        </p>
                    </header>
                    <label class="agenda-field">
                        <span>{"Motivo de la consulta"}</span>
                        <textarea
                            value={form.reason.clone()}
                            oninput={on_reason}
                            placeholder="Describe brevemente tus síntomas"
                        />
                    </label>
                    <label class="agenda-field">
                        <span>{"Fecha"}</span>
                        <input type="date" value={date_value} oninput={on_date} />
                    </label>
                    {
                        if form.date.is_some() {
                            render_slot_grid(form.time, dispatcher)
                        } else {
                            Html::default()
                        }
                    }
                    <footer class="agenda-dialog-actions">
                        <button type="button" class="agenda-secondary" onclick={on_cancel}>{"Cancelar"}</button>
                        <button
                            type="button"
                            class="agenda-primary"
                            disabled={!state.confirm_enabled()}
                            onclick={on_confirm}
                        >
                            {"Confirmar cita"}
                        </button>
                    </footer>
                </section>
            </div>
        }
    }

    fn render_slot_grid(selected: Option<TimeSlot>, dispatcher: UseReducerDispatcher<PanelStore>) -> Html {
        html! {
            <div class="agenda-slots" role="group" aria-label="Horarios disponibles">
                {
                    for TimeSlot::ALL.into_iter().map(|slot| {
                        let dispatcher = dispatcher.clone();
                        let is_selected = selected == Some(slot);
                        let onclick = Callback::from(move |_: MouseEvent| {
                            dispatcher.dispatch(PanelAction::SelectTime(slot));
                        });

                        html! {
                            <button
                                type="button"
                                class={classes!("agenda-slot", is_selected.then_some("is-selected"))}
                                aria-pressed={is_selected.to_string()}
                                onclick={onclick}
                            >
                                { slot.label() }
                            </button>
                        }
                    })
                }
            </div>
        }
    }

    fn render_section(section: PanelSection<'_>, on_cancel: &Callback<AppointmentId>) -> Html {
        let kind = section.kind;
        let cancel = (kind == SectionKind::Scheduled).then(|| on_cancel.clone());

        html! {
            <section class="agenda-section" data-kind={section_level(kind)}>
                <header>
                    <h3>{ kind.title() }</h3>
                    <span class="agenda-count">{ section.appointments.len() }</span>
                </header>
                {
                    if section.appointments.is_empty() {
                        html! { <p class="agenda-empty">{ kind.empty_label() }</p> }
                    } else {
                        html! {
                            <ul class="agenda-cards">
                                {
                                    for section.appointments.into_iter().map(|appointment| html! {
                                        <li key={appointment.id.as_str().to_string()}>
                                            <AppointmentCard appointment={appointment.clone()} on_cancel={cancel.clone()} />
                                        </li>
                                    })
                                }
                            </ul>
                        }
                    }
                }
            </section>
        }
    }

    fn section_level(kind: SectionKind) -> &'static str {
        match kind {
            SectionKind::Scheduled => "scheduled",
            SectionKind::InProgress => "in-progress",
            SectionKind::Cancelled => "cancelled",
        }
    }

    #[derive(Properties, PartialEq)]
    pub struct AppointmentCardProps {
        pub appointment: Appointment,
        #[prop_or_default]
        pub on_cancel: Option<Callback<AppointmentId>>,
    }

    #[function_component(AppointmentCard)]
    fn appointment_card(props: &AppointmentCardProps) -> Html {
        let appointment = &props.appointment;

        let date_block = match appointment.date.parts() {
            Ok(parts) => html! {
                <div class="card-date">
                    <span class="card-day">{ parts.day }</span>
                    <span class="card-month">{ parts.month }</span>
                    <span class="card-year">{ parts.year }</span>
                </div>
            },
            Err(_) => html! {
                <div class="card-date">
                    <span class="card-day">{ appointment.date.as_str() }</span>
                </div>
            },
        };

        let cancel_button = props.on_cancel.clone().map(|on_cancel| {
            let id = appointment.id.clone();
            let onclick = Callback::from(move |_: MouseEvent| on_cancel.emit(id.clone()));
            html! {
                <button type="button" class="card-cancel" onclick={onclick}>{"Cancelar cita"}</button>
            }
        });

        html! {
            <article class="appointment-card">
                { date_block }
                <div class="card-body">
                    <h4 class="card-reason">{ appointment.reason.clone() }</h4>
                    <p class="card-diagnosis">{ appointment.diagnosis.clone() }</p>
                    <div class="card-meta">
                        <span class="card-doctor">{ appointment.doctor.clone() }</span>
                        <span class="card-time">{ appointment.time.label() }</span>
                    </div>
                </div>
                { cancel_button.unwrap_or_default() }
            </article>
        }
    }

    /// Props nhận từ JavaScript khi mount.
    #[derive(Deserialize)]
    struct JsPanelProps {
        patient_name: String,
        #[serde(default)]
        current_user: Option<CurrentUser>,
        #[serde(default)]
        config: Option<PanelConfig>,
    }

    #[wasm_bindgen]
    pub fn mount_scheduling_panel(selector: &str, props: JsValue) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Selector lỗi: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("Không tìm thấy element theo selector"))?;

        let props: JsPanelProps = from_value(props)?;
        let config = props.config.unwrap_or_default();
        config
            .date_locale()
            .map_err(|err| JsValue::from_str(&format!("Cấu hình panel lỗi: {err}")))?;

        yew::Renderer::<SchedulingPanel>::with_root_and_props(
            target,
            SchedulingPanelProps {
                patient_name: props.patient_name,
                current_user: props.current_user,
                config,
            },
        )
        .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_scheduling_panel;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_scheduling_panel(
    _: &str,
    _: wasm_bindgen::JsValue,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "agenda-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}
