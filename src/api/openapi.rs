//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, catalog_handler, match_handler, participation_handler, team_handler,
    user_handler,
};
use crate::domain::{
    City, MatchResponse, Participation, PublicProfile, SkillLevel, Sport, Team, TeamRoster,
    UserResponse,
};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for the Matchmaking API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Matchmaking API",
        version = "0.1.0",
        description = "Sports matchmaking API: find players, organize matches, build teams",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::logout,
        auth_handler::check_email,
        // Catalog endpoints
        catalog_handler::list_cities,
        catalog_handler::list_sports,
        // User endpoints
        user_handler::get_me,
        user_handler::update_me,
        user_handler::delete_me,
        user_handler::my_levels,
        user_handler::set_level,
        user_handler::get_user,
        // Match endpoints
        match_handler::create_match,
        match_handler::search_matches,
        match_handler::get_match,
        match_handler::update_match,
        match_handler::delete_match,
        // Participation endpoints
        participation_handler::roster,
        participation_handler::join,
        participation_handler::leave,
        participation_handler::validate,
        participation_handler::score,
        // Team endpoints
        team_handler::list_teams,
        team_handler::create_team,
        team_handler::rename_team,
        team_handler::delete_team,
        team_handler::assign_member,
        team_handler::unassign_member,
    ),
    components(
        schemas(
            // Domain types
            City,
            Sport,
            UserResponse,
            PublicProfile,
            SkillLevel,
            MatchResponse,
            Participation,
            Team,
            TeamRoster,
            MessageResponse,
            TokenResponse,
            // Request types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::RegisterResponse,
            auth_handler::CheckEmailResponse,
            user_handler::UpdateProfileRequest,
            user_handler::SetLevelRequest,
            match_handler::CreateMatchRequest,
            match_handler::UpdateMatchRequest,
            participation_handler::ValidateRequest,
            participation_handler::ScoreRequest,
            team_handler::TeamNameRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and token revocation"),
        (name = "Catalog", description = "City and sport reference data"),
        (name = "Users", description = "Profiles and skill levels"),
        (name = "Matches", description = "Match organization and search"),
        (name = "Participations", description = "Joining, attendance and scoring"),
        (name = "Teams", description = "Team composition within a match")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
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
                        .description(Some("Bearer token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
