//! Request DTOs and JSON mapping.

use serde::Deserialize;
use serde_json::Value;

use geoportal_core::{DepartmentId, PermissionId, RoleId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role_id: Option<RoleId>,
    pub department_id: Option<DepartmentId>,
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
    pub role_id: Option<RoleId>,
    pub department_id: Option<DepartmentId>,
}

#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub name: String,
    pub description: Option<String>,
    /// Permission ids to link; when present on update, replaces the whole set.
    pub permissions: Option<Vec<PermissionId>>,
}

#[derive(Debug, Deserialize)]
pub struct DepartmentRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGeometryRequest {
    pub name: String,
    pub description: Option<String>,
    /// "Point" | "LineString" | "Polygon".
    pub geometry_type: String,
    /// Structured coordinates, nested per geometry type.
    pub coordinates: Value,
    pub metadata: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGeometryRequest {
    pub name: String,
    pub description: Option<String>,
    pub metadata: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn signup_request_uses_camel_case_ids() {
        let req: SignupRequest = serde_json::from_value(json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "secret",
            "roleId": 2,
            "departmentId": 5
        }))
        .unwrap();
        assert_eq!(req.role_id, Some(RoleId::from_i32(2)));
        assert_eq!(req.department_id, Some(DepartmentId::from_i32(5)));
    }

    #[test]
    fn geometry_request_accepts_nested_coordinates() {
        let req: CreateGeometryRequest = serde_json::from_value(json!({
            "name": "plot",
            "geometryType": "Polygon",
            "coordinates": [[[0.0,0.0],[0.0,1.0],[1.0,1.0],[0.0,0.0]]],
            "metadata": {"zone": "A"}
        }))
        .unwrap();
        assert_eq!(req.geometry_type, "Polygon");
        assert!(req.description.is_none());
    }
}
