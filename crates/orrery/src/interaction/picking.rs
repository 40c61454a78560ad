//! Pointer handling: hover on move, select on click.
//!
//! Hover is a two-slot memo (previous, current) that can hand the highlight
//! straight from one proxy to another. A press/release pair that moves less
//! than the drag threshold is a click and runs selection against the
//! selectable proxies; anything longer is a drag that orbits the view.
//! Selection reuses the hover color, so a selected proxy keeps its
//! highlight when the pointer leaves it.

use glam::Vec2;

use super::sync::ProxySync;
use crate::api::host::{Picker, ProxyFactory, SelectionListener};
use crate::api::types::{BodyId, ProxyHandle};
use crate::sim::system::PlanetarySystem;

/// Whether the pointer is currently pressed, and if so whether it has
/// travelled far enough to count as a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionMode {
    Idle,
    Pressed,
    Dragging,
}

/// Outcome of one pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionResult {
    None,
    /// Hover moved to a new body, or to nothing.
    HoverChanged { body: Option<BodyId> },
    Selected { body: BodyId },
    Deselected,
    /// The view was orbited by this many pixels.
    ViewOrbited { delta: Vec2 },
}

/// Everything a pointer handler touches, borrowed for the call.
pub struct PointerContext<'a, H: ProxyFactory + Picker, L: SelectionListener> {
    pub system: &'a PlanetarySystem,
    pub sync: &'a ProxySync,
    pub host: &'a mut H,
    pub listener: &'a mut L,
}

/// Hover and selection state for one scene.
pub struct InteractionSystem {
    mode: InteractionMode,
    hovered: Option<ProxyHandle>,
    selected: Option<ProxyHandle>,
    /// Position where the pointer was pressed.
    pointer_start: Vec2,
    /// Last pointer position, for drag deltas.
    last_pointer: Vec2,
    drag_threshold: f32,
}

impl InteractionSystem {
    pub fn new(drag_threshold: f32) -> Self {
        Self {
            mode: InteractionMode::Idle,
            hovered: None,
            selected: None,
            pointer_start: Vec2::ZERO,
            last_pointer: Vec2::ZERO,
            drag_threshold,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn hovered(&self) -> Option<ProxyHandle> {
        self.hovered
    }

    pub fn selected(&self) -> Option<ProxyHandle> {
        self.selected
    }

    pub fn on_pointer_down<H, L>(&mut self, pos: Vec2, _ctx: PointerContext<'_, H, L>) -> InteractionResult
    where
        H: ProxyFactory + Picker,
        L: SelectionListener,
    {
        self.mode = InteractionMode::Pressed;
        self.pointer_start = pos;
        self.last_pointer = pos;
        InteractionResult::None
    }

    pub fn on_pointer_move<H, L>(&mut self, pos: Vec2, ctx: PointerContext<'_, H, L>) -> InteractionResult
    where
        H: ProxyFactory + Picker,
        L: SelectionListener,
    {
        let delta = pos - self.last_pointer;
        self.last_pointer = pos;

        match self.mode {
            InteractionMode::Idle => self.update_hover(pos, ctx.sync, ctx.host),
            InteractionMode::Pressed => {
                if (pos - self.pointer_start).length() < self.drag_threshold {
                    return self.update_hover(pos, ctx.sync, ctx.host);
                }
                self.mode = InteractionMode::Dragging;
                let delta = pos - self.pointer_start;
                ctx.host.orbit_view(delta);
                InteractionResult::ViewOrbited { delta }
            }
            InteractionMode::Dragging => {
                ctx.host.orbit_view(delta);
                InteractionResult::ViewOrbited { delta }
            }
        }
    }

    pub fn on_pointer_up<H, L>(&mut self, pos: Vec2, ctx: PointerContext<'_, H, L>) -> InteractionResult
    where
        H: ProxyFactory + Picker,
        L: SelectionListener,
    {
        let was_click = self.mode == InteractionMode::Pressed
            && (pos - self.pointer_start).length() < self.drag_threshold;
        self.mode = InteractionMode::Idle;
        self.last_pointer = pos;
        if !was_click {
            return InteractionResult::None;
        }

        // The click point wins over wherever hover was last resolved.
        self.update_hover(pos, ctx.sync, ctx.host);
        self.select(pos, ctx)
    }

    /// Forget hover and selection without touching any proxy.
    pub fn reset(&mut self) {
        self.mode = InteractionMode::Idle;
        self.hovered = None;
        self.selected = None;
    }

    fn update_hover<H>(&mut self, pos: Vec2, sync: &ProxySync, host: &mut H) -> InteractionResult
    where
        H: ProxyFactory + Picker,
    {
        let hit = host.pick(pos, &sync.handles());
        if hit == self.hovered {
            return InteractionResult::None;
        }
        if let Some(previous) = self.hovered.take() {
            if Some(previous) != self.selected {
                restore_resting(previous, sync, host);
            }
        }
        if let Some(current) = hit {
            if let Some(record) = sync.record_for_handle(current) {
                host.set_proxy_color(current, record.hover);
            }
        }
        self.hovered = hit;
        InteractionResult::HoverChanged { body: hit.and_then(|h| sync.body_for(h)) }
    }

    fn select<H, L>(&mut self, pos: Vec2, ctx: PointerContext<'_, H, L>) -> InteractionResult
    where
        H: ProxyFactory + Picker,
        L: SelectionListener,
    {
        let hit = ctx.host.pick(pos, &ctx.sync.selectable_handles());
        let previous = self.selected.take();
        if let Some(previous) = previous.filter(|p| Some(*p) != hit && Some(*p) != self.hovered) {
            restore_resting(previous, ctx.sync, ctx.host);
        }

        let body = hit.and_then(|h| ctx.sync.body_for(h)).and_then(|id| ctx.system.get(id));
        match (hit, body) {
            (Some(handle), Some(body)) => {
                if let Some(record) = ctx.sync.record_for_handle(handle) {
                    ctx.host.set_proxy_color(handle, record.hover);
                }
                self.selected = Some(handle);
                log::debug!("selected {}", body.name);
                ctx.listener.on_body_selected(body);
                InteractionResult::Selected { body: body.id }
            }
            _ => {
                log::debug!("selection cleared");
                ctx.listener.on_background_selected();
                InteractionResult::Deselected
            }
        }
    }
}

impl Default for InteractionSystem {
    fn default() -> Self {
        Self::new(5.0)
    }
}

fn restore_resting<H: ProxyFactory>(handle: ProxyHandle, sync: &ProxySync, host: &mut H) {
    if let Some(record) = sync.record_for_handle(handle) {
        host.set_proxy_color(handle, record.resting);
    }
}
