use crate::codec::gradient::FillDescriptor;
use crate::foundation::core::{CanvasSize, Point, Vec2};
use crate::surface::objects::{
    ImageLayerHandle, ImageObject, LogoHandle, LogoObject, ObjectId, ObjectKind, OverlayHandle,
    OverlayObject, SurfaceObject, TextLayerHandle, TextObject,
};

/// Notification emitted by the surface as the user interacts with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The active object changed (`None` = selection cleared).
    SelectionChanged { id: Option<ObjectId> },
    /// An object was moved or scaled interactively.
    Modified(ObjectId),
}

/// Base plate painted below every object.
#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    pub color: String,
    pub gradient: Option<FillDescriptor>,
}

/// Ordered graph of live objects for one canvas. Index 0 is bottommost.
///
/// Every surface carries a generation number assigned by its owner; asynchronous work records
/// the generation it started against and is discarded when it no longer matches.
#[derive(Clone, Debug)]
pub struct Surface {
    size: CanvasSize,
    generation: u64,
    pub background: Background,
    objects: Vec<(ObjectId, SurfaceObject)>,
    next_id: u64,
    active: Option<ObjectId>,
    events: Vec<SurfaceEvent>,
}

impl Surface {
    pub fn new(size: CanvasSize, generation: u64, bg_color: &str) -> Self {
        Self {
            size,
            generation,
            background: Background {
                color: bg_color.to_owned(),
                gradient: None,
            },
            objects: Vec::new(),
            next_id: 1,
            active: None,
            events: Vec::new(),
        }
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn insert(&mut self, index: usize, obj: SurfaceObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        let at = index.min(self.objects.len());
        self.objects.insert(at, (id, obj));
        id
    }

    pub fn insert_image(&mut self, index: usize, obj: ImageObject) -> ImageLayerHandle {
        ImageLayerHandle(self.insert(index, SurfaceObject::Image(obj)))
    }

    pub fn insert_overlay(&mut self, index: usize, obj: OverlayObject) -> OverlayHandle {
        OverlayHandle(self.insert(index, SurfaceObject::Overlay(obj)))
    }

    pub fn insert_text(&mut self, index: usize, obj: TextObject) -> TextLayerHandle {
        TextLayerHandle(self.insert(index, SurfaceObject::Text(obj)))
    }

    pub fn insert_logo(&mut self, index: usize, obj: LogoObject) -> LogoHandle {
        LogoHandle(self.insert(index, SurfaceObject::Logo(obj)))
    }

    /// Remove an object; clears the selection if it was active.
    pub fn remove(&mut self, id: ObjectId) -> Option<SurfaceObject> {
        let idx = self.index_of(id)?;
        if self.active == Some(id) {
            self.set_active(None);
        }
        Some(self.objects.remove(idx).1)
    }

    /// Move an object to z-index `index` (clamped).
    /// Place `id` directly above `anchor`, or at the bottom when `anchor` is `None` or gone.
    pub fn move_above(&mut self, id: ObjectId, anchor: Option<ObjectId>) {
        let Some(from) = self.index_of(id) else {
            return;
        };
        let entry = self.objects.remove(from);
        let at = anchor
            .and_then(|a| self.index_of(a))
            .map_or(0, |i| i + 1);
        self.objects.insert(at, entry);
    }

    pub fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|(oid, _)| *oid == id)
    }

    /// Object kinds bottom to top.
    pub fn kinds(&self) -> Vec<ObjectKind> {
        self.objects.iter().map(|(_, o)| o.kind()).collect()
    }

    /// Objects bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SurfaceObject)> {
        self.objects.iter().map(|(id, o)| (*id, o))
    }

    pub fn get(&self, id: ObjectId) -> Option<&SurfaceObject> {
        self.objects
            .iter()
            .find(|(oid, _)| *oid == id)
            .map(|(_, o)| o)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SurfaceObject> {
        self.objects
            .iter_mut()
            .find(|(oid, _)| *oid == id)
            .map(|(_, o)| o)
    }

    pub fn image(&self, h: ImageLayerHandle) -> Option<&ImageObject> {
        match self.get(h.0)? {
            SurfaceObject::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn image_mut(&mut self, h: ImageLayerHandle) -> Option<&mut ImageObject> {
        match self.get_mut(h.0)? {
            SurfaceObject::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn overlay(&self, h: OverlayHandle) -> Option<&OverlayObject> {
        match self.get(h.0)? {
            SurfaceObject::Overlay(o) => Some(o),
            _ => None,
        }
    }

    pub fn text(&self, h: TextLayerHandle) -> Option<&TextObject> {
        match self.get(h.0)? {
            SurfaceObject::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, h: TextLayerHandle) -> Option<&mut TextObject> {
        match self.get_mut(h.0)? {
            SurfaceObject::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn logo(&self, h: LogoHandle) -> Option<&LogoObject> {
        match self.get(h.0)? {
            SurfaceObject::Logo(l) => Some(l),
            _ => None,
        }
    }

    pub fn logo_mut(&mut self, h: LogoHandle) -> Option<&mut LogoObject> {
        match self.get_mut(h.0)? {
            SurfaceObject::Logo(l) => Some(l),
            _ => None,
        }
    }

    pub fn active(&self) -> Option<ObjectId> {
        self.active
    }

    pub fn set_active(&mut self, id: Option<ObjectId>) {
        let id = id.filter(|id| self.get(*id).is_some_and(SurfaceObject::selectable));
        if self.active != id {
            self.active = id;
            self.events.push(SurfaceEvent::SelectionChanged { id });
        }
    }

    pub fn discard_active(&mut self) {
        self.set_active(None);
    }

    /// Topmost selectable object containing `p`.
    pub fn hit_test(&self, p: Point) -> Option<ObjectId> {
        self.objects
            .iter()
            .rev()
            .find(|(_, o)| o.selectable() && o.bounds().contains(p))
            .map(|(id, _)| *id)
    }

    pub fn translate(&mut self, id: ObjectId, d: Vec2) -> bool {
        let Some(obj) = self.get_mut(id) else {
            return false;
        };
        if !obj.selectable() {
            return false;
        }
        obj.translate(d);
        self.events.push(SurfaceEvent::Modified(id));
        true
    }

    pub fn scale(&mut self, id: ObjectId, fx: f64, fy: f64) -> bool {
        let Some(obj) = self.get_mut(id) else {
            return false;
        };
        if !obj.selectable() || !(fx.is_finite() && fy.is_finite() && fx > 0.0 && fy > 0.0) {
            return false;
        }
        obj.scale_by(fx, fy);
        self.events.push(SurfaceEvent::Modified(id));
        true
    }

    pub fn drain_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/graph.rs"]
mod tests;
