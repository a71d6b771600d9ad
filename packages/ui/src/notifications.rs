use std::time::Duration;

use api::ApiError;
use chrono::{DateTime, TimeDelta, Utc};
use dioxus::prelude::*;

use crate::auth::{use_auth, AuthState};
use crate::icons::{FaCircleCheck, FaCircleExclamation, FaCircleInfo, FaTriangleExclamation, FaXmark};
use crate::Icon;

const TOASTS_CSS: Asset = asset!("/assets/styling/toasts.css");

/// Most toasts on screen at once; the oldest is dropped first.
pub const MAX_TOASTS: usize = 5;
/// How long a toast stays up.
pub const TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    fn class(&self) -> &'static str {
        match self {
            ToastLevel::Info => "toast info",
            ToastLevel::Success => "toast success",
            ToastLevel::Warning => "toast warning",
            ToastLevel::Error => "toast error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    /// Queue a toast. Returns `None` when the same message is already showing.
    pub fn push(&mut self, level: ToastLevel, message: &str, now: DateTime<Utc>) -> Option<u64> {
        if self
            .toasts
            .iter()
            .any(|t| t.level == level && t.message == message)
        {
            return None;
        }
        self.next_id += 1;
        self.toasts.push(Toast {
            id: self.next_id,
            level,
            message: message.to_string(),
            created_at: now,
        });
        if self.toasts.len() > MAX_TOASTS {
            let overflow = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..overflow);
        }
        Some(self.next_id)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Remove toasts older than [`TOAST_TTL`].
    pub fn expire(&mut self, now: DateTime<Utc>) -> usize {
        let ttl = TimeDelta::from_std(TOAST_TTL).unwrap_or(TimeDelta::MAX);
        let before = self.toasts.len();
        self.toasts.retain(|t| now - t.created_at < ttl);
        before - self.toasts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// Copyable handle for raising toasts.
#[derive(Clone, Copy, PartialEq)]
pub struct Notifications {
    queue: Signal<ToastQueue>,
    auth: Signal<AuthState>,
}

impl Notifications {
    pub fn notify(&self, level: ToastLevel, message: impl AsRef<str>) {
        let mut queue = self.queue;
        queue.write().push(level, message.as_ref(), Utc::now());
    }

    pub fn success(&self, message: impl AsRef<str>) {
        self.notify(ToastLevel::Success, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.notify(ToastLevel::Info, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.notify(ToastLevel::Error, message);
    }

    pub fn dismiss(&self, id: u64) {
        let mut queue = self.queue;
        queue.write().dismiss(id);
    }

    /// Surface a failed request. Auth failures also end the local session.
    pub fn report_error(&self, err: &ApiError) {
        if err.is_auth_error() {
            let mut auth = self.auth;
            if !auth.peek().expired {
                auth.write().expire();
            }
            self.notify(ToastLevel::Warning, err.to_string());
            return;
        }
        tracing::warn!(error = %err, "Request failed");
        self.notify(ToastLevel::Error, err.to_string());
    }
}

pub fn use_notifications() -> Notifications {
    use_context::<Notifications>()
}

/// Provides [`Notifications`] and renders the toast stack.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let auth = use_auth();
    let mut queue = use_signal(ToastQueue::default);
    use_context_provider(|| Notifications { queue, auth });

    use_future(move || async move {
        loop {
            api::runtime::sleep(Duration::from_secs(1)).await;
            if !queue.peek().is_empty() {
                queue.write().expire(Utc::now());
            }
        }
    });

    rsx! {
        {children}
        ToastHost {}
    }
}

#[component]
fn ToastHost() -> Element {
    let notifications = use_notifications();
    let toasts: Vec<Toast> = notifications.queue.read().iter().cloned().collect();

    rsx! {
        document::Stylesheet { href: TOASTS_CSS }

        div {
            class: "toast-stack",
            role: "status",
            for toast in toasts {
                div {
                    key: "{toast.id}",
                    class: toast.level.class(),
                    match toast.level {
                        ToastLevel::Success => rsx! { Icon { icon: FaCircleCheck, width: 14, height: 14 } },
                        ToastLevel::Info => rsx! { Icon { icon: FaCircleInfo, width: 14, height: 14 } },
                        ToastLevel::Warning => rsx! { Icon { icon: FaTriangleExclamation, width: 14, height: 14 } },
                        ToastLevel::Error => rsx! { Icon { icon: FaCircleExclamation, width: 14, height: 14 } },
                    }
                    span { class: "toast-message", "{toast.message}" }
                    button {
                        class: "toast-close",
                        title: "Dismiss",
                        onclick: move |_| notifications.dismiss(toast.id),
                        Icon { icon: FaXmark, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_duplicates_suppressed() {
        let mut queue = ToastQueue::default();
        assert!(queue.push(ToastLevel::Error, "Not found", at(0)).is_some());
        assert!(queue.push(ToastLevel::Error, "Not found", at(1)).is_none());
        assert!(queue.push(ToastLevel::Info, "Not found", at(1)).is_some());
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut queue = ToastQueue::default();
        for i in 0..8 {
            queue.push(ToastLevel::Info, &format!("message {i}"), at(i));
        }
        assert_eq!(queue.len(), MAX_TOASTS);
        assert_eq!(queue.iter().next().unwrap().message, "message 3");
    }

    #[test]
    fn test_expire_and_dismiss() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastLevel::Success, "Saved", at(0)).unwrap();
        queue.push(ToastLevel::Info, "Welcome back", at(3));

        assert_eq!(queue.expire(at(4)), 0);
        assert_eq!(queue.expire(at(5)), 1);
        assert!(queue.iter().all(|t| t.id != first));

        let id = queue.iter().next().unwrap().id;
        queue.dismiss(id);
        assert!(queue.is_empty());
    }
}
