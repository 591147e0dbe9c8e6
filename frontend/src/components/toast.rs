use yew::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient global notification. The app keeps at most one; a newer
/// toast simply replaces a pending one.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastViewProps {
    pub toast: Option<Toast>,
}

#[function_component(ToastView)]
pub fn toast_view(props: &ToastViewProps) -> Html {
    match &props.toast {
        Some(toast) => {
            let kind_class = match toast.kind {
                ToastKind::Success => "success",
                ToastKind::Error => "error",
            };
            html! {
                <div class={classes!("toast", kind_class, "show")}>
                    {&toast.message}
                </div>
            }
        }
        None => html! {},
    }
}
