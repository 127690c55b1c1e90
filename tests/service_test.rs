//! Service layer tests over mocked repositories.
//!
//! The unit-of-work trait has generic transaction methods and cannot be
//! mocked directly, so these tests wrap per-repository mocks in a small
//! test double whose transaction methods are unsupported.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use mockall::mock;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use matchmaking_api::domain::{
    City, Match, MatchChanges, NewMatch, NewUser, Participation, Password, SkillLevel, Sport,
    Team, UpdateProfile, User,
};
use matchmaking_api::errors::{AppError, AppResult};
use matchmaking_api::infra::repositories::{
    CatalogRepository, MatchFilter, MatchRepository, ParticipationRepository, TeamRepository,
    UserRepository,
};
use matchmaking_api::infra::{TransactionContext, UnitOfWork};
use matchmaking_api::services::{
    AuthService, Authenticator, CatalogManager, CatalogService, CreateMatch, MatchManager,
    MatchSearch, MatchService, ParticipationManager, ParticipationService, Registration,
    TeamManager, TeamService, TokenDenylist, UserManager, UserService,
};
use matchmaking_api::types::PaginationParams;
use matchmaking_api::Config;

// =============================================================================
// Repository mocks and unit-of-work test double
// =============================================================================

mock! {
    UserRepo {}

    #[async_trait]
    impl UserRepository for UserRepo {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
        async fn email_exists(&self, email: &str) -> AppResult<bool>;
        async fn create(&self, data: NewUser) -> AppResult<User>;
        async fn update_profile(&self, id: Uuid, changes: UpdateProfile) -> AppResult<User>;
        async fn delete(&self, id: Uuid) -> AppResult<()>;
        async fn levels(&self, user_id: Uuid) -> AppResult<Vec<SkillLevel>>;
        async fn upsert_level(&self, level: SkillLevel) -> AppResult<SkillLevel>;
    }
}

mock! {
    MatchRepo {}

    #[async_trait]
    impl MatchRepository for MatchRepo {
        async fn create(&self, data: NewMatch) -> AppResult<Match>;
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Match>>;
        async fn search(
            &self,
            filter: MatchFilter,
            params: &PaginationParams,
        ) -> AppResult<(Vec<Match>, u64)>;
        async fn update(&self, id: Uuid, changes: MatchChanges) -> AppResult<Match>;
        async fn delete(&self, id: Uuid) -> AppResult<()>;
    }
}

mock! {
    ParticipationRepo {}

    #[async_trait]
    impl ParticipationRepository for ParticipationRepo {
        async fn list_for_match(&self, match_id: Uuid) -> AppResult<Vec<Participation>>;
        async fn list_for_team(&self, team_id: Uuid) -> AppResult<Vec<Participation>>;
        async fn find(&self, user_id: Uuid, match_id: Uuid) -> AppResult<Option<Participation>>;
        async fn count_for_match(&self, match_id: Uuid) -> AppResult<u64>;
        async fn remove(&self, user_id: Uuid, match_id: Uuid) -> AppResult<()>;
        async fn set_validated(
            &self,
            user_id: Uuid,
            match_id: Uuid,
            validated: bool,
        ) -> AppResult<Participation>;
        async fn set_score(
            &self,
            user_id: Uuid,
            match_id: Uuid,
            score: i16,
        ) -> AppResult<Participation>;
        async fn set_team(
            &self,
            user_id: Uuid,
            match_id: Uuid,
            team_id: Option<Uuid>,
        ) -> AppResult<Participation>;
    }
}

mock! {
    TeamRepo {}

    #[async_trait]
    impl TeamRepository for TeamRepo {
        async fn list_for_match(&self, match_id: Uuid) -> AppResult<Vec<Team>>;
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Team>>;
        async fn name_taken(&self, match_id: Uuid, name: &str) -> AppResult<bool>;
        async fn create(&self, match_id: Uuid, name: String) -> AppResult<Team>;
        async fn rename(&self, id: Uuid, name: String) -> AppResult<Team>;
        async fn delete(&self, id: Uuid) -> AppResult<()>;
    }
}

mock! {
    CatalogRepo {}

    #[async_trait]
    impl CatalogRepository for CatalogRepo {
        async fn list_cities(
            &self,
            search: Option<String>,
            params: &PaginationParams,
        ) -> AppResult<(Vec<City>, u64)>;
        async fn find_city(&self, id: i32) -> AppResult<Option<City>>;
        async fn list_sports(&self) -> AppResult<Vec<Sport>>;
        async fn find_sport(&self, id: i32) -> AppResult<Option<Sport>>;
    }
}

/// Unit-of-work over mocked repositories. Transactions are not supported;
/// seat-booking behavior is covered by database-backed tests.
struct TestUnitOfWork {
    users: Arc<MockUserRepo>,
    matches: Arc<MockMatchRepo>,
    participations: Arc<MockParticipationRepo>,
    teams: Arc<MockTeamRepo>,
    catalog: Arc<MockCatalogRepo>,
}

impl TestUnitOfWork {
    fn empty() -> Self {
        Self {
            users: Arc::new(MockUserRepo::new()),
            matches: Arc::new(MockMatchRepo::new()),
            participations: Arc::new(MockParticipationRepo::new()),
            teams: Arc::new(MockTeamRepo::new()),
            catalog: Arc::new(MockCatalogRepo::new()),
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn matches(&self) -> Arc<dyn MatchRepository> {
        self.matches.clone()
    }

    fn participations(&self) -> Arc<dyn ParticipationRepository> {
        self.participations.clone()
    }

    fn teams(&self) -> Arc<dyn TeamRepository> {
        self.teams.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogRepository> {
        self.catalog.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }

    async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

/// Denylist that never holds anything, for tests not exercising revocation
struct NullDenylist;

#[async_trait]
impl TokenDenylist for NullDenylist {
    async fn revoke(&self, _jti: &str, _ttl_seconds: u64) -> AppResult<()> {
        Ok(())
    }

    async fn is_revoked(&self, _jti: &str) -> AppResult<bool> {
        Ok(false)
    }
}

/// In-memory denylist, for tests exercising logout
#[derive(Default)]
struct MemoryDenylist {
    revoked: Mutex<HashSet<String>>,
}

#[async_trait]
impl TokenDenylist for MemoryDenylist {
    async fn revoke(&self, jti: &str, _ttl_seconds: u64) -> AppResult<()> {
        self.revoked.lock().unwrap().insert(jti.to_string());
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> AppResult<bool> {
        Ok(self.revoked.lock().unwrap().contains(jti))
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn football() -> Sport {
    Sport {
        id: 1,
        name: "football".to_string(),
        default_min_players: 10,
        default_max_players: 22,
    }
}

fn sample_match(organizer_id: Uuid) -> Match {
    let now = Utc::now();
    Match {
        id: Uuid::new_v4(),
        organizer_id,
        sport_id: 1,
        latitude: 47.218,
        longitude: -1.553,
        min_players: 2,
        max_players: 22,
        price: Decimal::ZERO,
        duration_minutes: 90,
        scheduled_at: now + chrono::Duration::days(3),
        description: None,
        recommended_level: 2,
        created_at: now,
        updated_at: now,
    }
}

fn sample_participation(user_id: Uuid, match_id: Uuid, validated: bool) -> Participation {
    Participation {
        user_id,
        match_id,
        team_id: None,
        validated,
        score: None,
        created_at: Utc::now(),
    }
}

fn sample_user(id: Uuid) -> User {
    User {
        id,
        city_id: 1,
        first_name: "Jeanne".to_string(),
        last_name: "Martin".to_string(),
        email: "jeanne.martin@example.com".to_string(),
        phone_number: None,
        password_hash: "hashed".to_string(),
        birthdate: NaiveDate::from_ymd_opt(1995, 4, 12).unwrap(),
        profile_picture_url: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn in_days(days: i64) -> DateTime<Utc> {
    Utc::now() + chrono::Duration::days(days)
}

fn create_match_input() -> CreateMatch {
    CreateMatch {
        sport_id: 1,
        latitude: 47.218,
        longitude: -1.553,
        min_players: None,
        max_players: None,
        price: Decimal::new(250, 2),
        duration_minutes: 90,
        scheduled_at: in_days(3),
        description: None,
        recommended_level: 2,
    }
}

fn nantes() -> City {
    City {
        id: 1,
        name: "Nantes".to_string(),
        postal_code: "44000".to_string(),
        department_name: "Loire-Atlantique".to_string(),
        department_code: "44".to_string(),
        region_name: "Pays de la Loire".to_string(),
        region_code: "52".to_string(),
        latitude: 47.218,
        longitude: -1.553,
    }
}

fn registration(email: &str) -> Registration {
    Registration {
        city_id: 1,
        first_name: "Jeanne".to_string(),
        last_name: "Martin".to_string(),
        email: email.to_string(),
        phone_number: None,
        password: "SecurePass123!".to_string(),
        birthdate: NaiveDate::from_ymd_opt(1995, 4, 12).unwrap(),
    }
}

fn test_config() -> Config {
    Config::for_tests("unit-test-secret-0123456789abcdef!")
}

// =============================================================================
// Auth service
// =============================================================================

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let mut users = MockUserRepo::new();
    users.expect_email_exists().returning(|_| Ok(true));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..TestUnitOfWork::empty()
    };
    let service = Authenticator::new(Arc::new(uow), Arc::new(NullDenylist), test_config());

    let result = service
        .register(registration("jeanne.martin@example.com"))
        .await;
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn register_rejects_unknown_city() {
    let mut users = MockUserRepo::new();
    users.expect_email_exists().returning(|_| Ok(false));

    let mut catalog = MockCatalogRepo::new();
    catalog.expect_find_city().returning(|_| Ok(None));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        catalog: Arc::new(catalog),
        ..TestUnitOfWork::empty()
    };
    let service = Authenticator::new(Arc::new(uow), Arc::new(NullDenylist), test_config());

    let result = service
        .register(registration("jeanne.martin@example.com"))
        .await;
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn register_lowercases_email_and_issues_bearer_token() {
    let mut users = MockUserRepo::new();
    users
        .expect_email_exists()
        .withf(|email| email == "jeanne.martin@example.com")
        .returning(|_| Ok(false));
    users
        .expect_create()
        .withf(|data| data.email == "jeanne.martin@example.com")
        .returning(|data| {
            let now = Utc::now();
            Ok(User {
                id: Uuid::new_v4(),
                city_id: data.city_id,
                first_name: data.first_name,
                last_name: data.last_name,
                email: data.email,
                phone_number: data.phone_number,
                password_hash: data.password_hash,
                birthdate: data.birthdate,
                profile_picture_url: None,
                created_at: now,
                updated_at: now,
            })
        });

    let mut catalog = MockCatalogRepo::new();
    catalog.expect_find_city().returning(|_| Ok(Some(nantes())));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        catalog: Arc::new(catalog),
        ..TestUnitOfWork::empty()
    };
    let service = Authenticator::new(Arc::new(uow), Arc::new(NullDenylist), test_config());

    let (user, token) = service
        .register(registration("Jeanne.Martin@Example.com"))
        .await
        .unwrap();
    assert_eq!(user.email, "jeanne.martin@example.com");
    assert_eq!(token.token_type, "Bearer");
    assert!(!token.access_token.is_empty());
}

#[tokio::test]
async fn login_rejects_unknown_email() {
    let mut users = MockUserRepo::new();
    users.expect_find_by_email().returning(|_| Ok(None));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..TestUnitOfWork::empty()
    };
    let service = Authenticator::new(Arc::new(uow), Arc::new(NullDenylist), test_config());

    let result = service
        .login(
            "nobody@example.com".to_string(),
            "SecurePass123!".to_string(),
        )
        .await;
    assert!(matches!(result, Err(AppError::InvalidGrant)));
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let hash: String = Password::new("CorrectHorse9!").unwrap().into();

    let mut users = MockUserRepo::new();
    users.expect_find_by_email().returning(move |_| {
        let mut user = sample_user(Uuid::new_v4());
        user.password_hash = hash.clone();
        Ok(Some(user))
    });

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..TestUnitOfWork::empty()
    };
    let service = Authenticator::new(Arc::new(uow), Arc::new(NullDenylist), test_config());

    let result = service
        .login(
            "jeanne.martin@example.com".to_string(),
            "WrongBattery0!".to_string(),
        )
        .await;
    assert!(matches!(result, Err(AppError::InvalidGrant)));
}

#[tokio::test]
async fn login_then_authenticate_roundtrip() {
    let user_id = Uuid::new_v4();
    let hash: String = Password::new("CorrectHorse9!").unwrap().into();

    let mut users = MockUserRepo::new();
    users.expect_find_by_email().returning(move |_| {
        let mut user = sample_user(user_id);
        user.password_hash = hash.clone();
        Ok(Some(user))
    });

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..TestUnitOfWork::empty()
    };
    let service = Authenticator::new(Arc::new(uow), Arc::new(NullDenylist), test_config());

    let token = service
        .login(
            "jeanne.martin@example.com".to_string(),
            "CorrectHorse9!".to_string(),
        )
        .await
        .unwrap();

    let claims = service.authenticate(&token.access_token).await.unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.email, "jeanne.martin@example.com");
}

#[tokio::test]
async fn logout_revokes_the_token() {
    let hash: String = Password::new("CorrectHorse9!").unwrap().into();

    let mut users = MockUserRepo::new();
    users.expect_find_by_email().returning(move |_| {
        let mut user = sample_user(Uuid::new_v4());
        user.password_hash = hash.clone();
        Ok(Some(user))
    });

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..TestUnitOfWork::empty()
    };
    let service = Authenticator::new(
        Arc::new(uow),
        Arc::new(MemoryDenylist::default()),
        test_config(),
    );

    let token = service
        .login(
            "jeanne.martin@example.com".to_string(),
            "CorrectHorse9!".to_string(),
        )
        .await
        .unwrap();

    assert!(service.authenticate(&token.access_token).await.is_ok());
    service.logout(&token.access_token).await.unwrap();

    let result = service.authenticate(&token.access_token).await;
    assert!(matches!(result, Err(AppError::InvalidGrant)));
}

// =============================================================================
// User service
// =============================================================================

#[tokio::test]
async fn get_unknown_user_is_not_found() {
    let mut users = MockUserRepo::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..TestUnitOfWork::empty()
    };
    let service = UserManager::new(Arc::new(uow));

    let result = service.get(Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn update_profile_rejects_empty_changes() {
    let service = UserManager::new(Arc::new(TestUnitOfWork::empty()));

    let result = service
        .update_profile(Uuid::new_v4(), UpdateProfile::default())
        .await;
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn update_profile_rejects_unknown_city() {
    let mut catalog = MockCatalogRepo::new();
    catalog.expect_find_city().returning(|_| Ok(None));

    let uow = TestUnitOfWork {
        catalog: Arc::new(catalog),
        ..TestUnitOfWork::empty()
    };
    let service = UserManager::new(Arc::new(uow));

    let changes = UpdateProfile {
        city_id: Some(99999),
        ..Default::default()
    };
    let result = service.update_profile(Uuid::new_v4(), changes).await;
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn update_profile_applies_changes() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepo::new();
    users
        .expect_update_profile()
        .withf(move |id, changes| *id == user_id && changes.first_name.as_deref() == Some("Paul"))
        .returning(move |id, _| Ok(sample_user(id)));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..TestUnitOfWork::empty()
    };
    let service = UserManager::new(Arc::new(uow));

    let changes = UpdateProfile {
        first_name: Some("Paul".to_string()),
        ..Default::default()
    };
    let updated = service.update_profile(user_id, changes).await.unwrap();
    assert_eq!(updated.id, user_id);
}

#[tokio::test]
async fn set_level_rejects_out_of_range() {
    let service = UserManager::new(Arc::new(TestUnitOfWork::empty()));

    let result = service.set_level(Uuid::new_v4(), 1, 6, None).await;
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));

    let result = service.set_level(Uuid::new_v4(), 1, -1, None).await;
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn set_level_rejects_unknown_sport() {
    let mut catalog = MockCatalogRepo::new();
    catalog.expect_find_sport().returning(|_| Ok(None));

    let uow = TestUnitOfWork {
        catalog: Arc::new(catalog),
        ..TestUnitOfWork::empty()
    };
    let service = UserManager::new(Arc::new(uow));

    let result = service.set_level(Uuid::new_v4(), 42, 3, None).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn set_level_upserts() {
    let user_id = Uuid::new_v4();

    let mut catalog = MockCatalogRepo::new();
    catalog.expect_find_sport().returning(|_| Ok(Some(football())));

    let mut users = MockUserRepo::new();
    users
        .expect_upsert_level()
        .withf(move |level| level.user_id == user_id && level.level == 3)
        .returning(|level| Ok(level));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        catalog: Arc::new(catalog),
        ..TestUnitOfWork::empty()
    };
    let service = UserManager::new(Arc::new(uow));

    let level = service
        .set_level(user_id, 1, 3, Some("Sunday league".to_string()))
        .await
        .unwrap();
    assert_eq!(level.sport_id, 1);
    assert_eq!(level.description.as_deref(), Some("Sunday league"));
}

// =============================================================================
// Match service
// =============================================================================

#[tokio::test]
async fn create_match_applies_sport_defaults() {
    let organizer = Uuid::new_v4();

    let mut catalog = MockCatalogRepo::new();
    catalog.expect_find_sport().returning(|_| Ok(Some(football())));

    let mut matches = MockMatchRepo::new();
    matches
        .expect_create()
        .withf(|data| data.min_players == 10 && data.max_players == 22)
        .returning(|data| {
            let now = Utc::now();
            Ok(Match {
                id: Uuid::new_v4(),
                organizer_id: data.organizer_id,
                sport_id: data.sport_id,
                latitude: data.latitude,
                longitude: data.longitude,
                min_players: data.min_players,
                max_players: data.max_players,
                price: data.price,
                duration_minutes: data.duration_minutes,
                scheduled_at: data.scheduled_at,
                description: data.description,
                recommended_level: data.recommended_level,
                created_at: now,
                updated_at: now,
            })
        });

    let uow = TestUnitOfWork {
        matches: Arc::new(matches),
        catalog: Arc::new(catalog),
        ..TestUnitOfWork::empty()
    };
    let service = MatchManager::new(Arc::new(uow));

    let created = service.create(organizer, create_match_input()).await.unwrap();
    assert_eq!(created.organizer_id, organizer);
    assert_eq!(created.min_players, 10);
    assert_eq!(created.max_players, 22);
}

#[tokio::test]
async fn create_match_rejects_unknown_sport() {
    let mut catalog = MockCatalogRepo::new();
    catalog.expect_find_sport().returning(|_| Ok(None));

    let uow = TestUnitOfWork {
        catalog: Arc::new(catalog),
        ..TestUnitOfWork::empty()
    };
    let service = MatchManager::new(Arc::new(uow));

    let result = service.create(Uuid::new_v4(), create_match_input()).await;
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn create_match_rejects_inverted_player_bounds() {
    let mut catalog = MockCatalogRepo::new();
    catalog.expect_find_sport().returning(|_| Ok(Some(football())));

    let uow = TestUnitOfWork {
        catalog: Arc::new(catalog),
        ..TestUnitOfWork::empty()
    };
    let service = MatchManager::new(Arc::new(uow));

    let data = CreateMatch {
        min_players: Some(12),
        max_players: Some(4),
        ..create_match_input()
    };
    let result = service.create(Uuid::new_v4(), data).await;
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn create_match_rejects_past_schedule() {
    let mut catalog = MockCatalogRepo::new();
    catalog.expect_find_sport().returning(|_| Ok(Some(football())));

    let uow = TestUnitOfWork {
        catalog: Arc::new(catalog),
        ..TestUnitOfWork::empty()
    };
    let service = MatchManager::new(Arc::new(uow));

    let data = CreateMatch {
        scheduled_at: in_days(-1),
        ..create_match_input()
    };
    let result = service.create(Uuid::new_v4(), data).await;
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn update_match_requires_organizer() {
    let organizer = Uuid::new_v4();
    let m = sample_match(organizer);
    let match_id = m.id;

    let mut matches = MockMatchRepo::new();
    matches
        .expect_find_by_id()
        .returning(move |_| Ok(Some(m.clone())));

    let uow = TestUnitOfWork {
        matches: Arc::new(matches),
        ..TestUnitOfWork::empty()
    };
    let service = MatchManager::new(Arc::new(uow));

    let result = service
        .update(Uuid::new_v4(), match_id, MatchChanges::default())
        .await;
    assert!(matches!(result, Err(AppError::Forbidden)));
}

#[tokio::test]
async fn update_match_keeps_capacity_above_participant_count() {
    let organizer = Uuid::new_v4();
    let m = sample_match(organizer);
    let match_id = m.id;

    let mut matches = MockMatchRepo::new();
    matches
        .expect_find_by_id()
        .returning(move |_| Ok(Some(m.clone())));

    let mut participations = MockParticipationRepo::new();
    participations.expect_count_for_match().returning(|_| Ok(10));

    let uow = TestUnitOfWork {
        matches: Arc::new(matches),
        participations: Arc::new(participations),
        ..TestUnitOfWork::empty()
    };
    let service = MatchManager::new(Arc::new(uow));

    let changes = MatchChanges {
        max_players: Some(5),
        ..Default::default()
    };
    let result = service.update(organizer, match_id, changes).await;
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn delete_match_requires_organizer() {
    let m = sample_match(Uuid::new_v4());
    let match_id = m.id;

    let mut matches = MockMatchRepo::new();
    matches
        .expect_find_by_id()
        .returning(move |_| Ok(Some(m.clone())));

    let uow = TestUnitOfWork {
        matches: Arc::new(matches),
        ..TestUnitOfWork::empty()
    };
    let service = MatchManager::new(Arc::new(uow));

    let result = service.delete(Uuid::new_v4(), match_id).await;
    assert!(matches!(result, Err(AppError::Forbidden)));
}

#[tokio::test]
async fn search_never_lists_past_matches() {
    let mut matches = MockMatchRepo::new();
    matches
        .expect_search()
        .withf(|filter, _| {
            // The lower time bound is always pinned to now or later
            filter
                .starts_after
                .is_some_and(|after| after >= Utc::now() - chrono::Duration::seconds(5))
        })
        .returning(|_, _| Ok((vec![], 0)));

    let uow = TestUnitOfWork {
        matches: Arc::new(matches),
        ..TestUnitOfWork::empty()
    };
    let service = MatchManager::new(Arc::new(uow));

    let search = MatchSearch {
        from: Some(in_days(-30)),
        ..Default::default()
    };
    let params = PaginationParams::new(None, None);
    let (found, total) = service.search(search, &params).await.unwrap();
    assert!(found.is_empty());
    assert_eq!(total, 0);
}

#[tokio::test]
async fn get_match_includes_participant_count() {
    let m = sample_match(Uuid::new_v4());
    let match_id = m.id;

    let mut matches = MockMatchRepo::new();
    matches
        .expect_find_by_id()
        .returning(move |_| Ok(Some(m.clone())));

    let mut participations = MockParticipationRepo::new();
    participations.expect_count_for_match().returning(|_| Ok(7));

    let uow = TestUnitOfWork {
        matches: Arc::new(matches),
        participations: Arc::new(participations),
        ..TestUnitOfWork::empty()
    };
    let service = MatchManager::new(Arc::new(uow));

    let (found, count) = service.get(match_id).await.unwrap();
    assert_eq!(found.id, match_id);
    assert_eq!(count, 7);
}

// =============================================================================
// Participation service
// =============================================================================

#[tokio::test]
async fn roster_of_unknown_match_is_not_found() {
    let mut matches = MockMatchRepo::new();
    matches.expect_find_by_id().returning(|_| Ok(None));

    let uow = TestUnitOfWork {
        matches: Arc::new(matches),
        ..TestUnitOfWork::empty()
    };
    let service = ParticipationManager::new(Arc::new(uow));

    let result = service.roster(Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn leave_requires_existing_participation() {
    let mut participations = MockParticipationRepo::new();
    participations
        .expect_remove()
        .returning(|_, _| Err(AppError::NotFound));

    let uow = TestUnitOfWork {
        participations: Arc::new(participations),
        ..TestUnitOfWork::empty()
    };
    let service = ParticipationManager::new(Arc::new(uow));

    let result = service.leave(Uuid::new_v4(), Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn validate_requires_organizer() {
    let m = sample_match(Uuid::new_v4());
    let match_id = m.id;

    let mut matches = MockMatchRepo::new();
    matches
        .expect_find_by_id()
        .returning(move |_| Ok(Some(m.clone())));

    let uow = TestUnitOfWork {
        matches: Arc::new(matches),
        ..TestUnitOfWork::empty()
    };
    let service = ParticipationManager::new(Arc::new(uow));

    let result = service
        .validate(Uuid::new_v4(), match_id, Uuid::new_v4(), true)
        .await;
    assert!(matches!(result, Err(AppError::Forbidden)));
}

#[tokio::test]
async fn score_rejects_out_of_range() {
    let service = ParticipationManager::new(Arc::new(TestUnitOfWork::empty()));

    let result = service.score(Uuid::new_v4(), Uuid::new_v4(), 9).await;
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn score_requires_validated_participation() {
    let user_id = Uuid::new_v4();
    let match_id = Uuid::new_v4();

    let mut participations = MockParticipationRepo::new();
    participations
        .expect_find()
        .returning(|user_id, match_id| Ok(Some(sample_participation(user_id, match_id, false))));

    let uow = TestUnitOfWork {
        participations: Arc::new(participations),
        ..TestUnitOfWork::empty()
    };
    let service = ParticipationManager::new(Arc::new(uow));

    let result = service.score(user_id, match_id, 4).await;
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn score_records_for_validated_participation() {
    let user_id = Uuid::new_v4();
    let match_id = Uuid::new_v4();

    let mut participations = MockParticipationRepo::new();
    participations
        .expect_find()
        .returning(|user_id, match_id| Ok(Some(sample_participation(user_id, match_id, true))));
    participations
        .expect_set_score()
        .withf(|_, _, score| *score == 4)
        .returning(|user_id, match_id, score| {
            let mut p = sample_participation(user_id, match_id, true);
            p.score = Some(score);
            Ok(p)
        });

    let uow = TestUnitOfWork {
        participations: Arc::new(participations),
        ..TestUnitOfWork::empty()
    };
    let service = ParticipationManager::new(Arc::new(uow));

    let scored = service.score(user_id, match_id, 4).await.unwrap();
    assert_eq!(scored.score, Some(4));
}

// =============================================================================
// Team service
// =============================================================================

#[tokio::test]
async fn create_team_rejects_duplicate_name() {
    let organizer = Uuid::new_v4();
    let m = sample_match(organizer);
    let match_id = m.id;

    let mut matches = MockMatchRepo::new();
    matches
        .expect_find_by_id()
        .returning(move |_| Ok(Some(m.clone())));

    let mut teams = MockTeamRepo::new();
    teams.expect_name_taken().returning(|_, _| Ok(true));

    let uow = TestUnitOfWork {
        matches: Arc::new(matches),
        teams: Arc::new(teams),
        ..TestUnitOfWork::empty()
    };
    let service = TeamManager::new(Arc::new(uow));

    let result = service
        .create(organizer, match_id, "Reds".to_string())
        .await;
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn create_team_rejects_blank_name() {
    let organizer = Uuid::new_v4();
    let m = sample_match(organizer);
    let match_id = m.id;

    let mut matches = MockMatchRepo::new();
    matches
        .expect_find_by_id()
        .returning(move |_| Ok(Some(m.clone())));

    let uow = TestUnitOfWork {
        matches: Arc::new(matches),
        ..TestUnitOfWork::empty()
    };
    let service = TeamManager::new(Arc::new(uow));

    let result = service.create(organizer, match_id, "   ".to_string()).await;
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn assign_requires_participation_in_match() {
    let organizer = Uuid::new_v4();
    let m = sample_match(organizer);
    let team = Team {
        id: Uuid::new_v4(),
        match_id: m.id,
        name: "Reds".to_string(),
    };
    let team_id = team.id;

    let mut matches = MockMatchRepo::new();
    matches
        .expect_find_by_id()
        .returning(move |_| Ok(Some(m.clone())));

    let mut teams = MockTeamRepo::new();
    teams
        .expect_find_by_id()
        .returning(move |_| Ok(Some(team.clone())));

    let mut participations = MockParticipationRepo::new();
    participations.expect_find().returning(|_, _| Ok(None));

    let uow = TestUnitOfWork {
        matches: Arc::new(matches),
        participations: Arc::new(participations),
        teams: Arc::new(teams),
        ..TestUnitOfWork::empty()
    };
    let service = TeamManager::new(Arc::new(uow));

    let result = service.assign(organizer, team_id, Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn unassign_requires_membership_in_team() {
    let organizer = Uuid::new_v4();
    let m = sample_match(organizer);
    let team = Team {
        id: Uuid::new_v4(),
        match_id: m.id,
        name: "Reds".to_string(),
    };
    let team_id = team.id;
    let other_team = Uuid::new_v4();

    let mut matches = MockMatchRepo::new();
    matches
        .expect_find_by_id()
        .returning(move |_| Ok(Some(m.clone())));

    let mut teams = MockTeamRepo::new();
    teams
        .expect_find_by_id()
        .returning(move |_| Ok(Some(team.clone())));

    let mut participations = MockParticipationRepo::new();
    participations.expect_find().returning(move |user_id, match_id| {
        let mut p = sample_participation(user_id, match_id, true);
        p.team_id = Some(other_team);
        Ok(Some(p))
    });

    let uow = TestUnitOfWork {
        matches: Arc::new(matches),
        participations: Arc::new(participations),
        teams: Arc::new(teams),
        ..TestUnitOfWork::empty()
    };
    let service = TeamManager::new(Arc::new(uow));

    let result = service.unassign(organizer, team_id, Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn list_builds_rosters_with_members() {
    let m = sample_match(Uuid::new_v4());
    let match_id = m.id;
    let team_a = Team {
        id: Uuid::new_v4(),
        match_id,
        name: "Blues".to_string(),
    };
    let member = Uuid::new_v4();
    let team_a_id = team_a.id;

    let mut matches = MockMatchRepo::new();
    matches
        .expect_find_by_id()
        .returning(move |_| Ok(Some(m.clone())));

    let mut teams = MockTeamRepo::new();
    teams
        .expect_list_for_match()
        .returning(move |_| Ok(vec![team_a.clone()]));

    let mut participations = MockParticipationRepo::new();
    participations.expect_list_for_team().returning(move |team_id| {
        let mut p = sample_participation(member, match_id, true);
        p.team_id = Some(team_id);
        Ok(vec![p])
    });

    let uow = TestUnitOfWork {
        matches: Arc::new(matches),
        participations: Arc::new(participations),
        teams: Arc::new(teams),
        ..TestUnitOfWork::empty()
    };
    let service = TeamManager::new(Arc::new(uow));

    let rosters = service.list(match_id).await.unwrap();
    assert_eq!(rosters.len(), 1);
    assert_eq!(rosters[0].id, team_a_id);
    assert_eq!(rosters[0].members, vec![member]);
}

// =============================================================================
// Catalog service
// =============================================================================

#[tokio::test]
async fn catalog_lists_sports() {
    let mut catalog = MockCatalogRepo::new();
    catalog
        .expect_list_sports()
        .returning(|| Ok(vec![football()]));

    let uow = TestUnitOfWork {
        catalog: Arc::new(catalog),
        ..TestUnitOfWork::empty()
    };
    let service = CatalogManager::new(Arc::new(uow));

    let sports = service.sports().await.unwrap();
    assert_eq!(sports.len(), 1);
    assert_eq!(sports[0].name, "football");
}
