//! 控制台视图路由 - 状态机
//!
//! 纯粹的业务逻辑层，不依赖于 DOM。URL 片段 (`#users`) 与当前视图双向同步：
//! 片段决定视图，视图切换后片段被改写为视图名。

use std::fmt::Display;

/// 控制台中的固定视图集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Dashboard,
    Users,
    Posts,
    Trips,
    Communities,
    Analytics,
    Feedback,
}

impl View {
    /// 导航栏中的顺序
    pub const ALL: [View; 7] = [
        View::Dashboard,
        View::Users,
        View::Posts,
        View::Trips,
        View::Communities,
        View::Analytics,
        View::Feedback,
    ];

    /// 视图名，同时也是 URL 片段
    pub fn name(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Users => "users",
            View::Posts => "posts",
            View::Trips => "trips",
            View::Communities => "communities",
            View::Analytics => "analytics",
            View::Feedback => "feedback",
        }
    }

    /// 顶栏标题
    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Users => "Users",
            View::Posts => "Posts",
            View::Trips => "Trips",
            View::Communities => "Communities",
            View::Analytics => "Analytics",
            View::Feedback => "Feedback",
        }
    }

    pub fn parse(name: &str) -> Option<View> {
        View::ALL.into_iter().find(|v| v.name() == name)
    }

    /// 解析 URL 片段，缺失或无法识别时回落到 Dashboard
    pub fn from_fragment(fragment: &str) -> View {
        View::parse(strip_fragment(fragment)).unwrap_or_default()
    }

    /// 尚无后端数据的视图显示的占位文案
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            View::Posts => Some("Posts data will be loaded here"),
            View::Trips => Some("Trips data will be loaded here"),
            View::Analytics => Some("Analytics coming soon"),
            _ => None,
        }
    }
}

impl Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn strip_fragment(fragment: &str) -> &str {
    fragment.trim_start_matches('#').trim()
}

/// 一次视图切换
///
/// 调用方需要：高亮导航、只显示该视图、更新标题、必要时改写片段、调用加载器。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub view: View,
    /// 当前 URL 片段与视图名不一致，需要改写
    pub rewrite_fragment: bool,
}

impl Transition {
    pub fn title(&self) -> &'static str {
        self.view.title()
    }

    pub fn fragment(&self) -> &'static str {
        self.view.name()
    }
}

/// 视图路由状态机
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRouter {
    current: View,
}

impl ViewRouter {
    /// 根据加载时的片段确定初始视图，并给出首次切换
    pub fn start(fragment: &str) -> (Self, Transition) {
        let view = View::from_fragment(fragment);
        let router = Self { current: view };
        let transition = Transition {
            view,
            rewrite_fragment: strip_fragment(fragment) != view.name(),
        };
        log::debug!("[Router] initial view: {}", view);
        (router, transition)
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn is_active(&self, view: View) -> bool {
        self.current == view
    }

    /// 点击导航：总是切换（重复点击即重新加载）
    pub fn select(&mut self, view: View) -> Transition {
        self.current = view;
        log::debug!("[Router] selected: {}", view);
        Transition {
            view,
            rewrite_fragment: true,
        }
    }

    /// 片段变化（包括浏览器前进/后退）
    ///
    /// 片段已经等于当前视图名时返回 None：那是我们自己改写片段产生的回声。
    pub fn on_fragment_change(&mut self, fragment: &str) -> Option<Transition> {
        let raw = strip_fragment(fragment);
        let view = View::from_fragment(fragment);
        if view == self.current && raw == view.name() {
            return None;
        }
        self.current = view;
        log::debug!("[Router] fragment changed to {:?} -> {}", raw, view);
        Some(Transition {
            view,
            rewrite_fragment: raw != view.name(),
        })
    }
}
