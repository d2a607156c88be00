//! Host change notifications.
//!
//! A host that moves markers directly (through `scene_mut`) reports the
//! moved ids here so dependent visuals re-sync: the horizon height
//! follows the horizon control and the one-point VP, the horizon line is
//! rebuilt when horizon-bound VPs of the active mode move, and aid lines
//! are redrawn when a complete aid group changes. The handler carries an
//! explicit re-entrancy guard on the session: its own scene writes may
//! re-trigger a host's observer, and the guard keeps that echo from
//! running the handler again.

use log::{debug, warn};

use super::PerspectiveRig;
use crate::diagnostics::NotifyReport;
use crate::scene::MarkerRole;
use crate::types::{MarkerId, PerspectiveMode};

impl PerspectiveRig {
    /// Processes a batch of moved markers. Stale ids are logged and
    /// counted, never fatal. Returns immediately when re-entered.
    pub fn notify_transforms(&mut self, moved: &[MarkerId]) -> NotifyReport {
        if self.in_notify {
            debug!("change notification re-entered; skipping");
            return NotifyReport {
                reentrant_skip: true,
                ..NotifyReport::default()
            };
        }
        self.in_notify = true;
        let report = self.process_transforms(moved);
        self.in_notify = false;
        report
    }

    fn process_transforms(&mut self, moved: &[MarkerId]) -> NotifyReport {
        let mut needs_horizon = false;
        let mut needs_aids = false;
        let mut stale = 0usize;

        for &id in moved {
            let Some((role, position)) = self.scene.marker(id).map(|m| (m.role, m.position))
            else {
                warn!("notify_transforms: marker {id:?} no longer exists");
                stale += 1;
                continue;
            };

            match role {
                MarkerRole::HorizonControl => {
                    if (self.options.horizon.z_level - position.z).abs() > 1e-3 {
                        self.options.horizon.z_level = position.z;
                    }
                    needs_horizon = true;
                }
                MarkerRole::OnePoint if self.mode == PerspectiveMode::OnePoint => {
                    // The one-point VP carries the horizon with it.
                    if (self.options.horizon.z_level - position.z).abs() > 1e-3 {
                        self.options.horizon.z_level = position.z;
                    }
                    needs_horizon = true;
                }
                MarkerRole::Aid { group, .. } => {
                    if self.options.display.show_aid_lines
                        && group.mode() == self.mode
                        && self.scene.aid_markers(group).len() == 4
                    {
                        needs_aids = true;
                    }
                }
                role if role.on_horizon() && role.mode() == Some(self.mode) => {
                    needs_horizon = true;
                }
                _ => {}
            }
        }

        if needs_horizon {
            self.rebuild_horizon();
        }
        if needs_aids {
            self.refresh_aid_lines();
        }
        NotifyReport {
            reentrant_skip: false,
            horizon_rebuilt: needs_horizon,
            aid_lines_refreshed: needs_aids,
            stale_markers: stale,
        }
    }
}
