use dimscale_protocol::ScreenMetrics;

/// Tablet heuristic: the shortest side reaches `min_side` (inclusive).
///
/// Uses the shortest side rather than the width so the answer doesn't change
/// on rotation, but does change when split-screen shrinks the window.
pub fn is_tablet(metrics: &ScreenMetrics, min_side: f64) -> bool {
    metrics.shortest_side() >= min_side
}
