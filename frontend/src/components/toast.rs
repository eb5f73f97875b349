//! 全局提示
//!
//! 挂在 App 根部，登出跳转后仍能显示 "Session expired" 之类的提示。

use leptos::prelude::*;
use travel_admin::actions::Notice;

/// 当前通知与其序号
///
/// 每条通知都有自己的序号，过期定时器只清除它自己那一条。
#[derive(Debug, Clone, Default, PartialEq)]
struct NoticeSlot {
    current: Option<Notice>,
    seq: u64,
}

impl NoticeSlot {
    fn show(&mut self, notice: Notice) -> u64 {
        self.seq += 1;
        self.current = Some(notice);
        self.seq
    }

    fn expire(&mut self, seq: u64) {
        if self.seq == seq {
            self.current = None;
        }
    }
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    slot: RwSignal<NoticeSlot>,
}

impl ToastContext {
    pub fn show(&self, notice: Notice) {
        if notice.is_error {
            log::warn!("{}", notice.message);
        }
        let mut seq = 0;
        self.slot.update(|slot| seq = slot.show(notice));

        // 3秒后清除通知
        let slot = self.slot;
        set_timeout(
            move || slot.update(|s| s.expire(seq)),
            std::time::Duration::from_secs(3),
        );
    }
}

pub fn provide_toast() -> ToastContext {
    let ctx = ToastContext {
        slot: RwSignal::new(NoticeSlot::default()),
    };
    provide_context(ctx);
    ctx
}

pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

#[component]
pub fn Toast() -> impl IntoView {
    let ToastContext { slot } = use_toast();

    move || {
        slot.with(|s| s.current.clone()).map(|n| {
            let class = if n.is_error {
                "alert alert-error shadow-lg"
            } else {
                "alert alert-success shadow-lg"
            };
            view! {
                <div class="toast toast-top toast-end z-50">
                    <div class=class>
                        <span>{n.message}</span>
                    </div>
                </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_timer_keeps_newer_notice() {
        let mut slot = NoticeSlot::default();
        let first = slot.show(Notice::info("Community created successfully!"));
        let second = slot.show(Notice::error("Failed to update status"));

        slot.expire(first);
        assert_eq!(
            slot.current.as_ref().map(|n| n.message.as_str()),
            Some("Failed to update status")
        );

        slot.expire(second);
        assert_eq!(slot.current, None);
    }
}
