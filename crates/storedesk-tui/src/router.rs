use storedesk_app::Navigation;
use storedesk_core::route::Route;

/// What the root loop does with the screens after a batch of navigation
/// effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RouteChange {
    Stay,
    /// Re-read the active screen's data.
    Reload,
    /// Replace the active screen; overlays survive.
    Switch(Route),
    /// Drop every screen and overlay and start over at the route.
    Rebuild(Route),
}

/// Folds the effects one settled request produced. A route change subsumes
/// a refresh since the new screen reads fresh data anyway.
pub(crate) fn plan(current: &Route, navigations: &[Navigation]) -> RouteChange {
    let mut change = RouteChange::Stay;
    for navigation in navigations {
        change = match (change, navigation) {
            (_, Navigation::Assign(route)) => RouteChange::Rebuild(route.clone()),
            (RouteChange::Rebuild(_), Navigation::Push(route)) => {
                RouteChange::Rebuild(route.clone())
            }
            (previous, Navigation::Push(route)) if route == current => match previous {
                RouteChange::Switch(_) => RouteChange::Switch(route.clone()),
                other => other,
            },
            (_, Navigation::Push(route)) => RouteChange::Switch(route.clone()),
            (RouteChange::Stay, Navigation::Refresh) => RouteChange::Reload,
            (other, Navigation::Refresh) => other,
        };
    }
    change
}
