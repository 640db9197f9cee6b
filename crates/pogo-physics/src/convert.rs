//! Conversions between glam (game side) and nalgebra (rapier side)

use glam::{Quat, Vec3};
use nalgebra::{Isometry3, Point3, Quaternion, Translation3, UnitQuaternion, Vector3};
use pogo_core::{ColliderId, SurfaceId};
use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

pub fn to_na_vector(v: Vec3) -> Vector3<f32> {
    Vector3::new(v.x, v.y, v.z)
}

pub fn to_na_point(v: Vec3) -> Point3<f32> {
    Point3::new(v.x, v.y, v.z)
}

pub fn to_glam_vec(v: &Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn to_na_rotation(q: Quat) -> UnitQuaternion<f32> {
    UnitQuaternion::new_normalize(Quaternion::new(q.w, q.x, q.y, q.z))
}

pub fn to_glam_quat(q: &UnitQuaternion<f32>) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

pub fn to_isometry(position: Vec3, rotation: Quat) -> Isometry3<f32> {
    Isometry3::from_parts(
        Translation3::new(position.x, position.y, position.z),
        to_na_rotation(rotation),
    )
}

pub fn collider_id(handle: ColliderHandle) -> ColliderId {
    let (index, generation) = handle.into_raw_parts();
    ColliderId(((generation as u64) << 32) | index as u64)
}

pub fn surface_id(handle: RigidBodyHandle) -> SurfaceId {
    let (index, generation) = handle.into_raw_parts();
    SurfaceId(((generation as u64) << 32) | index as u64)
}

pub fn surface_handle(id: SurfaceId) -> RigidBodyHandle {
    RigidBodyHandle::from_raw_parts(id.0 as u32, (id.0 >> 32) as u32)
}
