//! 控制台视图导航
//!
//! 把核心库的 `ViewRouter` 状态机接到 `location.hash` 与 `hashchange` 事件上。

use leptos::ev;
use leptos::prelude::*;
use travel_admin::{Transition, View, ViewRouter};

fn current_fragment() -> String {
    window().location().hash().unwrap_or_default()
}

fn set_fragment(fragment: &str) {
    if let Err(e) = window().location().set_hash(fragment) {
        log::error!("[ViewRouter] failed to rewrite fragment: {:?}", e);
    }
}

/// 视图导航服务
#[derive(Clone, Copy)]
pub struct ViewNavigator {
    router: StoredValue<ViewRouter>,
    active: RwSignal<View>,
    /// 每次切换自增，重复选择同一视图时也会变化，用于触发重新加载
    visit: RwSignal<u64>,
}

impl ViewNavigator {
    fn new() -> Self {
        let (router, transition) = ViewRouter::start(&current_fragment());
        let nav = Self {
            router: StoredValue::new(router),
            active: RwSignal::new(transition.view),
            visit: RwSignal::new(0),
        };
        nav.apply(transition);
        nav
    }

    pub fn active(&self) -> View {
        self.active.get()
    }

    pub fn is_active(&self, view: View) -> bool {
        self.active.get() == view
    }

    pub fn visit(&self) -> u64 {
        self.visit.get()
    }

    /// 导航栏点击
    pub fn select(&self, view: View) {
        if let Some(transition) = self.router.try_update_value(|r| r.select(view)) {
            self.apply(transition);
        }
    }

    fn on_fragment_change(&self) {
        let fragment = current_fragment();
        if let Some(Some(transition)) = self
            .router
            .try_update_value(|r| r.on_fragment_change(&fragment))
        {
            self.apply(transition);
        }
    }

    fn apply(&self, transition: Transition) {
        if transition.rewrite_fragment {
            // 改写后触发的 hashchange 会被状态机识别为回声
            set_fragment(transition.fragment());
        }
        self.active.set(transition.view);
        self.visit.update(|v| *v += 1);
    }
}

/// 创建导航服务并监听 `hashchange`，组件卸载时移除监听
pub fn provide_view_navigator() -> ViewNavigator {
    let nav = ViewNavigator::new();
    let handle = window_event_listener(ev::hashchange, move |_| nav.on_fragment_change());
    on_cleanup(move || handle.remove());
    provide_context(nav);
    nav
}

pub fn use_view_navigator() -> ViewNavigator {
    use_context::<ViewNavigator>().expect("ViewNavigator should be provided")
}
