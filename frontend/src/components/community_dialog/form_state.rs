//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责数据的持有、重置与字数统计。
//! 文件输入框不受控，通过 `NodeRef` 读取。

use leptos::prelude::*;
use travel_admin::actions::description_over_limit;
use travel_admin_shared::MAX_DESCRIPTION_WORDS;
use travel_admin_shared::text::word_count;

/// 使用 `RwSignal` 因为它实现了 `Copy` trait，适合在闭包与组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub file_input: NodeRef<leptos::html::Input>,
    pub submitting: RwSignal<bool>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            file_input: NodeRef::new(),
            submitting: RwSignal::new(false),
        }
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        self.name.set(String::new());
        self.description.set(String::new());
        if let Some(input) = self.file_input.get_untracked() {
            input.set_value("");
        }
    }

    /// 描述框下方的实时计数，如 `12/35 words`
    pub fn counter_label(&self) -> String {
        let words = self.description.with(|d| word_count(d));
        format!("{}/{} words", words, MAX_DESCRIPTION_WORDS)
    }

    pub fn over_limit(&self) -> bool {
        self.description.with(|d| description_over_limit(d))
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
