// Wire protocol DTOs and conversions for the HTTP input surface.

use crate::domain::world::{Body, BodyKind};
use crate::domain::{InteractAction, ItemKind, Pose, RiderId, RiderNotice};
use crate::use_cases::{HostEvent, WorldSnapshot};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Rider entering the world.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinRequest {
    pub rider_id: u64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    // Facing in radians.
    #[serde(default)]
    pub yaw: f64,
    #[serde(default)]
    pub pitch: f64,
    // Fuel items in the rider's inventory.
    #[serde(default)]
    pub fuel: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaveRequest {
    pub rider_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceObjectRequest {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A rider using (or attacking with) the item in hand.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractRequest {
    pub rider_id: u64,
    pub action: ActionDto,
    pub item: ItemDto,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionDto {
    UseAir,
    UseBlock,
    Attack,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemDto {
    Detonator,
    Fuel,
    #[serde(other)]
    Other,
}

impl From<ActionDto> for InteractAction {
    fn from(action: ActionDto) -> Self {
        match action {
            ActionDto::UseAir => InteractAction::UseAir,
            ActionDto::UseBlock => InteractAction::UseBlock,
            ActionDto::Attack => InteractAction::Attack,
        }
    }
}

impl From<ItemDto> for ItemKind {
    fn from(item: ItemDto) -> Self {
        match item {
            ItemDto::Detonator => ItemKind::Detonator,
            ItemDto::Fuel => ItemKind::Fuel,
            ItemDto::Other => ItemKind::Other,
        }
    }
}

impl From<JoinRequest> for HostEvent {
    fn from(req: JoinRequest) -> Self {
        HostEvent::Join {
            rider: RiderId::new(req.rider_id),
            pose: Pose::new(DVec3::new(req.x, req.y, req.z), req.yaw, req.pitch),
            fuel: req.fuel,
        }
    }
}

impl From<LeaveRequest> for HostEvent {
    fn from(req: LeaveRequest) -> Self {
        HostEvent::Leave {
            rider: RiderId::new(req.rider_id),
        }
    }
}

impl From<PlaceObjectRequest> for HostEvent {
    fn from(req: PlaceObjectRequest) -> Self {
        HostEvent::PlaceObject {
            position: DVec3::new(req.x, req.y, req.z),
        }
    }
}

impl From<InteractRequest> for HostEvent {
    fn from(req: InteractRequest) -> Self {
        HostEvent::Interact {
            rider: RiderId::new(req.rider_id),
            action: req.action.into(),
            item_in_hand: req.item.into(),
        }
    }
}

/// Latest world state, published once per host tick.
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshotDto {
    pub tick: u64,
    pub bodies: Vec<BodyDto>,
    pub armed_riders: Vec<u64>,
    pub recent_effects: Vec<[f64; 3]>,
    pub notices: Vec<NoticeDto>,
}

/// A message for one rider, e.g. `{"rider_id": 3, "notice": "missing_fuel"}`.
#[derive(Debug, Clone, Serialize)]
pub struct NoticeDto {
    pub rider_id: u64,
    pub notice: &'static str,
}

impl NoticeDto {
    fn new(rider: RiderId, notice: RiderNotice) -> Self {
        let notice = match notice {
            RiderNotice::MissingFuel => "missing_fuel",
        };
        Self {
            rider_id: rider.entity().0,
            notice,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyDto {
    pub id: u64,
    pub kind: &'static str,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
}

impl From<&Body> for BodyDto {
    fn from(b: &Body) -> Self {
        let kind = match b.kind {
            BodyKind::Rider => "rider",
            BodyKind::Prop => "prop",
            BodyKind::Explosive => "explosive",
        };
        Self {
            id: b.id.0,
            kind,
            x: b.pose.position.x,
            y: b.pose.position.y,
            z: b.pose.position.z,
            vx: b.velocity.x,
            vy: b.velocity.y,
            vz: b.velocity.z,
        }
    }
}

impl From<&WorldSnapshot> for WorldSnapshotDto {
    fn from(s: &WorldSnapshot) -> Self {
        Self {
            tick: s.tick,
            bodies: s.bodies.iter().map(BodyDto::from).collect(),
            armed_riders: s.armed_riders.iter().map(|r| r.entity().0).collect(),
            recent_effects: s.recent_effects.iter().map(|p| p.to_array()).collect(),
            notices: s
                .notices
                .iter()
                .map(|(rider, notice)| NoticeDto::new(*rider, *notice))
                .collect(),
        }
    }
}
