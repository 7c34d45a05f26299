//! Simulation state: the bodies, their scene nodes, and the per-frame update.

use std::collections::HashSet;
use std::f64::consts::FRAC_PI_2;

use glam::DVec3;
use helio_config::{BodyConfig, Config};
use helio_orbit::{OrbitError, OrbitalBody};
use serde::Serialize;
use tracing::{debug, info};

use crate::SceneError;
use crate::transform::{NodeDesc, NodeKind, SceneHost, Transform};

/// Rings are authored in the XY plane and tilted into the orbital (XZ) plane.
const RING_TILT_X: f64 = -FRAC_PI_2;

/// Scene nodes owned by one satellite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SatelliteNodes<H> {
    /// Pivot child of the parent's container; carries the circular offset.
    pub container: H,
    /// The satellite sphere, spinning in place inside `container`.
    pub mesh: H,
}

/// Scene nodes owned by one orbiting body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyNodes<H> {
    /// Pivot at the scene root; translated along the ellipse every frame.
    pub container: H,
    /// The planet sphere, placed once at its nominal distance inside `container`.
    pub mesh: H,
    pub ring: Option<H>,
    pub satellite: Option<SatelliteNodes<H>>,
}

/// A validated body and the nodes that render it.
#[derive(Debug, Clone)]
pub struct SimBody<H> {
    name: String,
    satellite_name: Option<String>,
    orbit: OrbitalBody,
    nodes: BodyNodes<H>,
}

impl<H: Copy> SimBody<H> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn orbit(&self) -> &OrbitalBody {
        &self.orbit
    }

    pub fn nodes(&self) -> BodyNodes<H> {
        self.nodes
    }
}

/// World-space report for one body at the last update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub name: String,
    /// True anomaly in radians.
    pub angle: f64,
    /// Container translation written by the last update.
    pub container: [f64; 3],
    /// Scene-space position of the planet mesh.
    pub world: [f64; 3],
    /// Distance of the mesh from the sun.
    pub distance: f64,
    /// Accumulated self-rotation of the mesh.
    pub spin: f64,
    pub satellite: Option<SatelliteSnapshot>,
}

/// World-space report for a satellite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatelliteSnapshot {
    pub name: String,
    pub world: [f64; 3],
    /// Length of the satellite container's offset from its parent container.
    pub orbital_radius: f64,
}

/// Everything the orrery animates, built once from the body table.
///
/// Body parameters never change after [`build`](Self::build); only node
/// transforms in the host are rewritten by [`update`](Self::update).
#[derive(Debug)]
pub struct SimulationState<H: SceneHost> {
    sun: H::Handle,
    sun_spin_rate: f64,
    bodies: Vec<SimBody<H::Handle>>,
    frame_count: u64,
    last_time: f64,
}

fn validate(body: &BodyConfig) -> Result<OrbitalBody, SceneError> {
    OrbitalBody::new(body.params()).map_err(|source| SceneError::InvalidBody {
        name: body.name.clone(),
        source,
    })
}

fn place<H: SceneHost>(host: &mut H, handle: H::Handle, position: DVec3) -> Result<(), SceneError> {
    host.node_mut(handle)
        .ok_or_else(|| SceneError::UnknownHandle(format!("{handle:?}")))?
        .set_position(position);
    Ok(())
}

impl<H: SceneHost> SimulationState<H> {
    /// Validate the body table and create every scene node in `host`.
    ///
    /// All bodies are validated before any node is spawned, so a bad table
    /// leaves the host untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidBody`] for out-of-domain parameters,
    /// [`SceneError::DuplicateBody`] for repeated names, and wiring errors
    /// from the host.
    pub fn build(config: &Config, host: &mut H) -> Result<Self, SceneError> {
        if !config.sun.spin_rate.is_finite() {
            return Err(SceneError::InvalidBody {
                name: "sun".to_string(),
                source: OrbitError::NonFiniteParameter("spin_rate"),
            });
        }

        let mut names = HashSet::new();
        let mut validated = Vec::with_capacity(config.bodies.len());
        for body in &config.bodies {
            if !names.insert(body.name.as_str()) {
                return Err(SceneError::DuplicateBody(body.name.clone()));
            }
            validated.push((body, validate(body)?));
        }

        let sun = host.spawn(NodeDesc::new(
            "sun",
            NodeKind::Sun {
                radius: config.sun.radius,
                texture: config.sun.texture.clone(),
            },
        ));
        place(host, sun, DVec3::ZERO)?;

        let mut bodies = Vec::with_capacity(validated.len());
        for (body, orbit) in validated {
            let nodes = Self::spawn_body(host, body, &orbit)?;
            debug!(
                "Spawned {} at nominal distance {:.3} (periapsis {:.3}, apoapsis {:.3})",
                body.name,
                orbit.placement_offset(),
                helio_orbit::periapsis(orbit.semi_major_axis(), orbit.eccentricity()),
                helio_orbit::apoapsis(orbit.semi_major_axis(), orbit.eccentricity())
            );
            bodies.push(SimBody {
                name: body.name.clone(),
                satellite_name: body.satellite.as_ref().map(|s| s.name.clone()),
                orbit,
                nodes,
            });
        }

        info!(
            "Built scene: sun + {} bodies ({} ringed, {} with satellites)",
            bodies.len(),
            bodies.iter().filter(|b| b.nodes.ring.is_some()).count(),
            bodies.iter().filter(|b| b.nodes.satellite.is_some()).count(),
        );

        Ok(Self {
            sun,
            sun_spin_rate: config.sun.spin_rate,
            bodies,
            frame_count: 0,
            last_time: 0.0,
        })
    }

    fn spawn_body(
        host: &mut H,
        body: &BodyConfig,
        orbit: &OrbitalBody,
    ) -> Result<BodyNodes<H::Handle>, SceneError> {
        let local = DVec3::new(orbit.placement_offset(), 0.0, 0.0);

        let container = host.spawn(NodeDesc::pivot(format!("{}/orbit", body.name)));
        let mesh = host.spawn(NodeDesc::new(
            body.name.clone(),
            NodeKind::Planet {
                radius: body.radius,
                texture: body.texture.clone(),
            },
        ));
        host.attach(container, mesh)?;
        place(host, container, DVec3::ZERO)?;
        place(host, mesh, local)?;

        let ring = match &body.ring {
            Some(ring) => {
                let handle = host.spawn(NodeDesc::new(
                    format!("{}/ring", body.name),
                    NodeKind::Ring {
                        inner_radius: ring.inner_radius,
                        outer_radius: ring.outer_radius,
                        texture: ring.texture.clone(),
                        tilt_x: RING_TILT_X,
                    },
                ));
                host.attach(container, handle)?;
                place(host, handle, local)?;
                Some(handle)
            }
            None => None,
        };

        let satellite = match &body.satellite {
            Some(sat) => {
                let sat_container =
                    host.spawn(NodeDesc::pivot(format!("{}/{}/orbit", body.name, sat.name)));
                let sat_mesh = host.spawn(NodeDesc::new(
                    sat.name.clone(),
                    NodeKind::Satellite {
                        radius: sat.radius,
                        texture: sat.texture.clone(),
                    },
                ));
                host.attach(container, sat_container)?;
                host.attach(sat_container, sat_mesh)?;
                place(host, sat_container, DVec3::ZERO)?;
                place(host, sat_mesh, local)?;
                Some(SatelliteNodes {
                    container: sat_container,
                    mesh: sat_mesh,
                })
            }
            None => None,
        };

        Ok(BodyNodes {
            container,
            mesh,
            ring,
            satellite,
        })
    }

    /// Advance every node to time `now` (milliseconds).
    ///
    /// Spins the sun, moves each container along its ellipse, spins each
    /// mesh, then swings each satellite around its parent by the parent's
    /// new spin angle. Performs no allocation.
    pub fn update(&mut self, host: &mut H, now: f64) {
        if let Some(sun) = host.node_mut(self.sun) {
            sun.rotate_y(self.sun_spin_rate);
        }

        for body in &self.bodies {
            if let Some(container) = host.node_mut(body.nodes.container) {
                container.set_position(body.orbit.container_position(now));
            }

            let Some(mesh) = host.node_mut(body.nodes.mesh) else {
                continue;
            };
            mesh.rotate_y(body.orbit.spin_rate());
            let parent_spin = mesh.rotation_y();

            if let (Some(nodes), Some(sat)) = (body.nodes.satellite, body.orbit.satellite()) {
                if let Some(sat_mesh) = host.node_mut(nodes.mesh) {
                    sat_mesh.rotate_y(sat.spin_rate);
                }
                if let Some(offset) = body.orbit.satellite_position(parent_spin)
                    && let Some(sat_container) = host.node_mut(nodes.container)
                {
                    sat_container.set_position(offset);
                }
            }
        }

        self.frame_count += 1;
        self.last_time = now;
    }

    pub fn sun(&self) -> H::Handle {
        self.sun
    }

    pub fn bodies(&self) -> &[SimBody<H::Handle>] {
        &self.bodies
    }

    pub fn body(&self, name: &str) -> Option<&SimBody<H::Handle>> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Number of updates applied so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Timestamp of the last update.
    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    /// Report every body's state as of the last update.
    pub fn snapshot(&self, host: &H) -> Vec<BodySnapshot> {
        self.bodies
            .iter()
            .map(|body| {
                let container = host
                    .node(body.nodes.container)
                    .map_or(DVec3::ZERO, Transform::position);
                let world = host.world_position(body.nodes.mesh).unwrap_or(DVec3::ZERO);
                let spin = host
                    .node(body.nodes.mesh)
                    .map_or(0.0, Transform::rotation_y);

                let satellite = body.nodes.satellite.map(|nodes| SatelliteSnapshot {
                    name: body.satellite_name.clone().unwrap_or_default(),
                    world: host
                        .world_position(nodes.mesh)
                        .unwrap_or(DVec3::ZERO)
                        .to_array(),
                    orbital_radius: host
                        .node(nodes.container)
                        .map_or(0.0, |n| n.position().length()),
                });

                BodySnapshot {
                    name: body.name.clone(),
                    angle: helio_orbit::angle_at(self.last_time, body.orbit.angular_speed()),
                    container: container.to_array(),
                    world: world.to_array(),
                    distance: world.length(),
                    spin,
                    satellite,
                }
            })
            .collect()
    }
}
