use std::collections::HashSet;

pub const DEFAULT_THRESHOLD: f64 = 0.1;
pub const DEFAULT_BOTTOM_MARGIN: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RegionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl RegionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RevealObserver {
    threshold: f64,
    bottom_margin: f64,
    revealed: HashSet<String>,
}

impl Default for RevealObserver {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_BOTTOM_MARGIN)
    }
}

impl RevealObserver {
    pub fn new(threshold: f64, bottom_margin: f64) -> Self {
        Self {
            threshold,
            bottom_margin,
            revealed: HashSet::new(),
        }
    }

    pub fn visible_ratio(&self, region: &RegionBounds, viewport_height: f64) -> f64 {
        let root_bottom = (viewport_height - self.bottom_margin).max(0.0);
        let bottom = region.top + region.height;

        if region.height <= 0.0 {
            return if region.top >= 0.0 && region.top <= root_bottom { 1.0 } else { 0.0 };
        }

        let overlap = bottom.min(root_bottom) - region.top.max(0.0);
        (overlap / region.height).clamp(0.0, 1.0)
    }

    pub fn observe(&mut self, viewport_height: f64, regions: &[RegionBounds]) -> Vec<String> {
        let mut newly = Vec::new();
        for region in regions {
            if self.revealed.contains(&region.id) {
                continue;
            }
            let ratio = self.visible_ratio(region, viewport_height);
            if ratio > 0.0 && ratio >= self.threshold {
                self.revealed.insert(region.id.clone());
                newly.push(region.id.clone());
            }
        }
        newly
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }
}
