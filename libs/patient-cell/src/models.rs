use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use utoipa::{IntoParams, ToSchema};

use shared_models::{error::AppError, Patch, PatientStatus};
use shared_utils::validation::{Validate, Validator};

pub const MIN_AGE: i32 = 0;
pub const MAX_AGE: i32 = 150;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePatientRequest {
    #[schema(example = "John Smith")]
    pub name: String,
    #[schema(example = "Male")]
    pub gender: String,
    #[schema(example = 35, minimum = 0, maximum = 150)]
    pub age: i32,
    #[schema(example = "https://i.pravatar.cc/150?img=12")]
    pub avatar: String,
    pub status: PatientStatus,
    #[schema(example = "+1 (555) 555-0115")]
    pub phone: String,
    #[schema(example = "smith.johnny@gmail.com")]
    pub email: String,
    #[schema(example = "26-11-2024")]
    pub last_appointment: String,
    #[schema(example = "31-11-2024")]
    pub upcoming_appointment: String,
}

impl CreatePatientRequest {
    /// Column values for a new `patients` row.
    pub fn to_row(&self) -> Value {
        json!({
            "name": self.name,
            "gender": self.gender,
            "age": self.age,
            "avatar": self.avatar,
            "status": self.status.as_str(),
            "phone": self.phone,
            "email": self.email,
            "last_appointment": self.last_appointment,
            "upcoming_appointment": self.upcoming_appointment,
        })
    }
}

impl Validate for CreatePatientRequest {
    fn validate(&self) -> Result<(), AppError> {
        let mut validator = Validator::new();
        validator
            .non_empty("name", &self.name)
            .non_empty("gender", &self.gender)
            .range("age", self.age, MIN_AGE, MAX_AGE)
            .non_empty("avatar", &self.avatar)
            .non_empty("phone", &self.phone)
            .email("email", &self.email)
            .non_empty("lastAppointment", &self.last_appointment)
            .non_empty("upcomingAppointment", &self.upcoming_appointment);
        validator.finish()
    }
}

/// Partial patient update. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePatientRequest {
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    #[schema(value_type = Option<String>)]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    #[schema(value_type = Option<String>)]
    pub gender: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    #[schema(value_type = Option<i32>, minimum = 0, maximum = 150)]
    pub age: Patch<i32>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    #[schema(value_type = Option<String>)]
    pub avatar: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    #[schema(value_type = Option<PatientStatus>)]
    pub status: Patch<PatientStatus>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    #[schema(value_type = Option<String>)]
    pub phone: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    #[schema(value_type = Option<String>)]
    pub email: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    #[schema(value_type = Option<String>)]
    pub last_appointment: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    #[schema(value_type = Option<String>)]
    pub upcoming_appointment: Patch<String>,
}

impl UpdatePatientRequest {
    /// Column values for the fields present in the request.
    pub fn to_columns(&self) -> Map<String, Value> {
        let mut columns = Map::new();

        if let Patch::Value(v) = &self.name {
            columns.insert("name".to_string(), json!(v));
        }
        if let Patch::Value(v) = &self.gender {
            columns.insert("gender".to_string(), json!(v));
        }
        if let Patch::Value(v) = &self.age {
            columns.insert("age".to_string(), json!(v));
        }
        if let Patch::Value(v) = &self.avatar {
            columns.insert("avatar".to_string(), json!(v));
        }
        if let Patch::Value(v) = &self.status {
            columns.insert("status".to_string(), json!(v.as_str()));
        }
        if let Patch::Value(v) = &self.phone {
            columns.insert("phone".to_string(), json!(v));
        }
        if let Patch::Value(v) = &self.email {
            columns.insert("email".to_string(), json!(v));
        }
        if let Patch::Value(v) = &self.last_appointment {
            columns.insert("last_appointment".to_string(), json!(v));
        }
        if let Patch::Value(v) = &self.upcoming_appointment {
            columns.insert("upcoming_appointment".to_string(), json!(v));
        }

        columns
    }

    /// True when the request names no field to change.
    pub fn is_empty(&self) -> bool {
        self.to_columns().is_empty()
    }
}

impl Validate for UpdatePatientRequest {
    fn validate(&self) -> Result<(), AppError> {
        let mut validator = Validator::new();
        validator
            .patch_non_empty("name", &self.name)
            .patch_non_empty("gender", &self.gender)
            .not_null("age", &self.age)
            .patch_non_empty("avatar", &self.avatar)
            .not_null("status", &self.status)
            .patch_non_empty("phone", &self.phone)
            .not_null("email", &self.email)
            .patch_non_empty("lastAppointment", &self.last_appointment)
            .patch_non_empty("upcomingAppointment", &self.upcoming_appointment);

        if let Patch::Value(age) = self.age {
            validator.range("age", age, MIN_AGE, MAX_AGE);
        }
        if let Patch::Value(email) = &self.email {
            validator.email("email", email);
        }

        validator.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PatientListQuery {
    /// Filter patients by status: `all`, `pending` or `past`. `all` disables the filter.
    pub status: Option<String>,
}
