use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::attendance::model::{
    AttendanceRecord, AttendanceSummary, AttendanceWithStudent, MarkAttendanceDto,
    MarkAttendanceResponse,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, RegisterRequestDto, RegisterResponse};
use crate::modules::buses::model::{Bus, CreateBusDto};
use crate::modules::locations::model::{DriverLocation, LocationAck, LocationUpdateDto};
use crate::modules::otp::model::{GenerateCodeResponse, SubmitCodeRequest};
use crate::modules::users::model::{CreateUserDto, UpdateProfileDto, User, UserRole, UserSummary};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_profile,
        crate::modules::attendance::controller::mark_attendance,
        crate::modules::attendance::controller::list_all_attendance,
        crate::modules::attendance::controller::list_student_attendance,
        crate::modules::attendance::controller::student_attendance_summary,
        crate::modules::otp::controller::generate_code,
        crate::modules::otp::controller::submit_code,
        crate::modules::buses::controller::list_buses,
        crate::modules::buses::controller::create_bus,
        crate::modules::buses::controller::delete_bus,
        crate::modules::locations::controller::update_location,
        crate::modules::locations::controller::get_latest_location,
    ),
    components(
        schemas(
            User,
            UserRole,
            UserSummary,
            CreateUserDto,
            UpdateProfileDto,
            LoginRequest,
            LoginResponse,
            RegisterRequestDto,
            RegisterResponse,
            ErrorResponse,
            AttendanceRecord,
            AttendanceWithStudent,
            AttendanceSummary,
            MarkAttendanceDto,
            MarkAttendanceResponse,
            GenerateCodeResponse,
            SubmitCodeRequest,
            Bus,
            CreateBusDto,
            DriverLocation,
            LocationUpdateDto,
            LocationAck,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and registration"),
        (name = "Users", description = "User management and profiles"),
        (name = "Attendance", description = "Attendance ledger"),
        (name = "Attendance codes", description = "Driver-issued verification codes"),
        (name = "Buses", description = "Bus management"),
        (name = "Driver location", description = "Driver position reporting")
    ),
    info(
        title = "Campusride API",
        version = "0.1.0",
        description = "College transport tracking API: role-based auth, OTP attendance verification, buses, and driver locations.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
