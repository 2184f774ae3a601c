//! 可选依赖包装器
//!
//! 消费者向容器请求 `Optional<T>` 而不是 `T`，容器未命中时得到
//! [`Optional::Empty`]，而不是解析失败。

/// 可选依赖
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Optional<T> {
    /// 未提供
    Empty,
    /// 已提供
    Present(T),
}

impl<T> Optional<T> {
    /// 是否已提供值
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// 获取值的引用
    pub fn as_ref(&self) -> Optional<&T> {
        match self {
            Self::Empty => Optional::Empty,
            Self::Present(value) => Optional::Present(value),
        }
    }

    /// 映射内部值
    pub fn map<U, F>(self, f: F) -> Optional<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Empty => Optional::Empty,
            Self::Present(value) => Optional::Present(f(value)),
        }
    }

    /// 获取值，为空时返回给定默认值
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Empty => default,
            Self::Present(value) => value,
        }
    }

    /// 转换为 [`Option`]
    pub fn into_option(self) -> Option<T> {
        self.into()
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Present(value),
            None => Self::Empty,
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        match value {
            Optional::Empty => None,
            Optional::Present(value) => Some(value),
        }
    }
}
