use crate::image::image_src;
use crate::record::{format_metric, Metric, PlayerRecord};

/// Gap between the pointer and the popup's top-left corner.
pub const POINTER_OFFSET: f64 = 16.0;
/// Space kept between a clamped popup and the viewport edge.
pub const VIEWPORT_MARGIN: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Where the popup goes before its size is known.
pub fn anchor(pointer: Point) -> Point {
    Point {
        x: pointer.x + POINTER_OFFSET,
        y: pointer.y + POINTER_OFFSET,
    }
}

/// Pulls the popup back inside the right and bottom viewport edges.
pub fn clamp_to_viewport(anchor: Point, popup: Size, viewport: Size) -> Point {
    let x = if anchor.x + popup.width > viewport.width {
        viewport.width - popup.width - VIEWPORT_MARGIN
    } else {
        anchor.x
    };
    let y = if anchor.y + popup.height > viewport.height {
        viewport.height - popup.height - VIEWPORT_MARGIN
    } else {
        anchor.y
    };
    Point { x, y }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    pub name: String,
    pub team: String,
    pub role: String,
    pub runs: String,
    pub strike_rate: String,
    pub bat_avg: String,
    pub image_src: String,
}

impl PopupContent {
    pub fn from_record(record: &PlayerRecord) -> Self {
        Self {
            name: record.name.clone(),
            team: record.team.clone(),
            role: record.playing_role.clone(),
            runs: format_metric(record, Metric::Runs),
            strike_rate: format_metric(record, Metric::StrikeRate),
            bat_avg: format_metric(record, Metric::BatAvg),
            image_src: image_src(&record.name),
        }
    }
}

/// Player identity for rendered elements, filled by the renderers.
///
/// `K` is whatever handle the host uses for an element; the browser uses the
/// DOM element itself, tests use plain integers.
#[derive(Debug, Clone)]
pub struct HoverRegistry<K> {
    entries: Vec<(K, String)>,
}

impl<K> Default for HoverRegistry<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> HoverRegistry<K> {
    pub fn register(&mut self, key: K, name: impl Into<String>) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            entry.1 = name;
        } else {
            self.entries.push((key, name));
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn resolve(&self, key: &K) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, name)| name.as_str())
    }

    /// First registered element along `path`, innermost first.
    pub fn resolve_path<'a>(&self, path: &'a [K]) -> Option<(&'a K, &str)> {
        path.iter()
            .find_map(|key| self.resolve(key).map(|name| (key, name)))
    }

    /// Registered element along `path`, else the innermost element whose
    /// `data-player-name` markup `tagged` can read. The markup covers
    /// elements the renderers never saw, such as server-rendered cards.
    pub fn resolve_tagged<'a>(
        &self,
        path: &'a [K],
        tagged: impl Fn(&K) -> Option<String>,
    ) -> Option<(&'a K, String)> {
        if let Some((key, name)) = self.resolve_path(path) {
            return Some((key, name.to_string()));
        }
        path.iter().find_map(|key| {
            tagged(key)
                .filter(|name| !name.trim().is_empty())
                .map(|name| (key, name))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `start` followed by its ancestors, innermost first.
pub fn ancestors<K>(start: Option<K>, parent: impl Fn(&K) -> Option<K>) -> Vec<K> {
    let mut path = Vec::new();
    let mut current = start;
    while let Some(key) = current {
        current = parent(&key);
        path.push(key);
    }
    path
}

/// What the host should do with the popup after a lookup resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupUpdate {
    pub content: PopupContent,
    pub anchor: Point,
}

/// Pointer tracking for the player popup.
#[derive(Debug, Clone)]
pub struct HoverState<K> {
    pub registry: HoverRegistry<K>,
    last_target: Option<K>,
    visible: bool,
}

impl<K> Default for HoverState<K> {
    fn default() -> Self {
        Self {
            registry: HoverRegistry::default(),
            last_target: None,
            visible: false,
        }
    }
}

impl<K: PartialEq + Clone> HoverState<K> {
    /// Pointer entered the innermost element of `path`. Returns the tagged
    /// element and the player name to look up, if any element is tagged.
    pub fn pointer_enter(
        &mut self,
        path: &[K],
        tagged: impl Fn(&K) -> Option<String>,
    ) -> Option<(K, String)> {
        let (key, name) = self.registry.resolve_tagged(path, tagged)?;
        self.last_target = Some(key.clone());
        Some((key.clone(), name))
    }

    /// A lookup for `target` finished. Stale results, where the pointer has
    /// moved on or left, are dropped, as are names missing from `players`.
    pub fn lookup_resolved(
        &mut self,
        target: &K,
        name: &str,
        players: &[PlayerRecord],
        pointer: Point,
    ) -> Option<PopupUpdate> {
        if self.last_target.as_ref() != Some(target) {
            return None;
        }
        let record = players.iter().find(|player| player.name == name)?;
        self.visible = true;
        Some(PopupUpdate {
            content: PopupContent::from_record(record),
            anchor: anchor(pointer),
        })
    }

    /// Pointer left the innermost element of `path`. Returns `true` when
    /// the popup should be hidden.
    pub fn pointer_leave(&mut self, path: &[K], tagged: impl Fn(&K) -> Option<String>) -> bool {
        if self.registry.resolve_tagged(path, tagged).is_none() {
            return false;
        }
        self.hide();
        true
    }

    pub fn popup_leave(&mut self) {
        self.hide();
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub const fn last_target(&self) -> Option<&K> {
        self.last_target.as_ref()
    }

    fn hide(&mut self) {
        self.last_target = None;
        self.visible = false;
    }
}
