//! Navigation intents and the view hierarchy they act on.

use super::error::RouteError;

/// Callback run once a present or dismiss transition finishes.
pub type Completion = Box<dyn FnOnce() + Send>;

/// What a [`Route`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    /// Show the target modally over the originating view.
    Present,
    /// Push the target onto the originating view's navigation stack.
    Push,
    /// Pop one view, or with `Some(n)` go back to the view `n` levels below the top.
    Pop(Option<usize>),
    /// Pop back to the bottom of the navigation stack.
    PopToRoot,
    /// Dismiss the originating view.
    Dismiss,
}

impl RouteKind {
    /// Returns true if this kind needs a target view.
    #[must_use]
    pub const fn requires_target(self) -> bool {
        matches!(self, Self::Present | Self::Push)
    }

    /// Returns true if this kind needs a navigation stack.
    #[must_use]
    pub const fn requires_stack(self) -> bool {
        matches!(self, Self::Push | Self::Pop(_) | Self::PopToRoot)
    }
}

/// External view controller hierarchy driven by the router.
///
/// `View` is an opaque handle; the router never looks inside it.
pub trait ViewHierarchy {
    /// Handle to a view.
    type View: Clone;

    /// Returns the navigation stack containing `from`, bottom first, or
    /// `None` when `from` is not inside a navigation container.
    fn navigation_stack(&self, from: &Self::View) -> Option<Vec<Self::View>>;

    fn present(
        &mut self,
        from: &Self::View,
        view: Self::View,
        animated: bool,
        completion: Option<Completion>,
    );

    fn push(&mut self, from: &Self::View, view: Self::View, animated: bool);

    fn pop(&mut self, from: &Self::View, animated: bool);

    fn pop_to(&mut self, from: &Self::View, target: &Self::View, animated: bool);

    fn pop_to_root(&mut self, from: &Self::View, animated: bool);

    fn dismiss(&mut self, from: &Self::View, animated: bool, completion: Option<Completion>);
}

/// A navigation intent with an optional target view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<V> {
    pub kind: RouteKind,
    pub target: Option<V>,
}

impl<V: Clone> Route<V> {
    /// Creates a route of `kind` towards `target`.
    pub const fn new(kind: RouteKind, target: Option<V>) -> Self {
        Self { kind, target }
    }

    pub const fn present(view: V) -> Self {
        Self::new(RouteKind::Present, Some(view))
    }

    pub const fn push(view: V) -> Self {
        Self::new(RouteKind::Push, Some(view))
    }

    pub const fn pop() -> Self {
        Self::new(RouteKind::Pop(None), None)
    }

    pub const fn pop_by(levels: usize) -> Self {
        Self::new(RouteKind::Pop(Some(levels)), None)
    }

    pub const fn pop_to_root() -> Self {
        Self::new(RouteKind::PopToRoot, None)
    }

    pub const fn dismiss() -> Self {
        Self::new(RouteKind::Dismiss, None)
    }

    fn require_target(&self) -> Result<V, RouteError> {
        self.target.clone().ok_or(RouteError::MissingTarget)
    }

    /// Performs the route from `from`, checking its preconditions first.
    ///
    /// `completion` is only used by present and dismiss transitions.
    ///
    /// # Errors
    ///
    /// - [`RouteError::MissingTarget`] for present/push without a target.
    /// - [`RouteError::MissingNavigationStack`] for push/pop outside a stack.
    /// - [`RouteError::NotEnoughViews`] when popping by more levels than the
    ///   stack can give back.
    pub fn try_navigate<H>(
        &self,
        hierarchy: &mut H,
        from: &V,
        animated: bool,
        completion: Option<Completion>,
    ) -> Result<(), RouteError>
    where
        H: ViewHierarchy<View = V>,
    {
        // Stack before target: a push outside a stack reports the missing stack.
        let stack = if self.kind.requires_stack() {
            stack_of(hierarchy, from)?
        } else {
            Vec::new()
        };
        let target = if self.kind.requires_target() {
            Some(self.require_target()?)
        } else {
            None
        };

        match (self.kind, target) {
            (RouteKind::Present, Some(view)) => {
                hierarchy.present(from, view, animated, completion);
            }
            (RouteKind::Push, Some(view)) => hierarchy.push(from, view, animated),
            (RouteKind::Present | RouteKind::Push, None) => return Err(RouteError::MissingTarget),
            (RouteKind::Pop(None), _) => hierarchy.pop(from, animated),
            (RouteKind::Pop(Some(levels)), _) => {
                if stack.len() <= levels {
                    return Err(RouteError::NotEnoughViews {
                        requested: levels,
                        available: stack.len(),
                    });
                }
                let destination = &stack[stack.len() - 1 - levels];
                hierarchy.pop_to(from, destination, animated);
            }
            (RouteKind::PopToRoot, _) => hierarchy.pop_to_root(from, animated),
            (RouteKind::Dismiss, _) => hierarchy.dismiss(from, animated, completion),
        }
        Ok(())
    }

    /// Performs the route, treating a violated precondition as a bug.
    ///
    /// # Panics
    ///
    /// Panics when [`try_navigate`](Self::try_navigate) would return an error.
    pub fn navigate<H>(
        &self,
        hierarchy: &mut H,
        from: &V,
        animated: bool,
        completion: Option<Completion>,
    ) where
        H: ViewHierarchy<View = V>,
    {
        if let Err(err) = self.try_navigate(hierarchy, from, animated, completion) {
            panic!("Router: {err}");
        }
    }
}

fn stack_of<H: ViewHierarchy>(hierarchy: &H, from: &H::View) -> Result<Vec<H::View>, RouteError> {
    hierarchy
        .navigation_stack(from)
        .ok_or(RouteError::MissingNavigationStack)
}
