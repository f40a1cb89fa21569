#![allow(dead_code)]

use async_trait::async_trait;
use portfolio_site::{
    AppConfig, AppState, Argon2Hasher, InMemorySessionStore,
    auth::AdminSession,
    config::AdminSeed,
    models::{Message, NewMessage, NewUser, Project, ProjectForm, User},
    password::CredentialHasher,
    repository::{RepoResult, Repository},
    session::{SessionStore, SessionToken},
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicI64, AtomicUsize, Ordering},
};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery-staple";

// --- MOCK REPOSITORY IMPLEMENTATION ---

/// In-memory `Repository` that counts every call, so tests can assert that a
/// rejected request never reached the store.
#[derive(Default)]
pub struct MockRepo {
    pub projects: Mutex<Vec<Project>>,
    pub messages: Mutex<Vec<Message>>,
    pub users: Mutex<Vec<User>>,
    calls: AtomicUsize,
    last_id: AtomicI64,
}

impl MockRepo {
    pub fn with_projects(projects: Vec<Project>) -> Self {
        let last_id = projects.iter().map(|p| p.id).max().unwrap_or(0);
        Self {
            projects: Mutex::new(projects),
            last_id: AtomicI64::new(last_id),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn project_count(&self) -> usize {
        self.projects.lock().unwrap().len()
    }

    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn next_id(&self) -> i64 {
        self.last_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl Repository for MockRepo {
    async fn list_projects(&self) -> RepoResult<Vec<Project>> {
        self.touch();
        Ok(self.projects.lock().unwrap().clone())
    }

    async fn get_project(&self, id: i64) -> RepoResult<Option<Project>> {
        self.touch();
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn create_project(&self, form: &ProjectForm) -> RepoResult<Project> {
        self.touch();
        let project = Project {
            id: self.next_id(),
            title: form.title.clone(),
            description: form.description.clone(),
            image_url: form.image_url.clone(),
            project_link: form.link().map(str::to_string),
        };
        self.projects.lock().unwrap().push(project.clone());
        Ok(project)
    }

    async fn update_project(&self, id: i64, form: &ProjectForm) -> RepoResult<Option<Project>> {
        self.touch();
        let mut projects = self.projects.lock().unwrap();
        Ok(projects.iter_mut().find(|p| p.id == id).map(|p| {
            p.title = form.title.clone();
            p.description = form.description.clone();
            p.image_url = form.image_url.clone();
            p.project_link = form.link().map(str::to_string);
            p.clone()
        }))
    }

    async fn delete_project(&self, id: i64) -> RepoResult<bool> {
        self.touch();
        let mut projects = self.projects.lock().unwrap();
        let before = projects.len();
        projects.retain(|p| p.id != id);
        Ok(projects.len() < before)
    }

    async fn create_message(&self, message: &NewMessage) -> RepoResult<Message> {
        self.touch();
        let stored = Message {
            id: self.next_id(),
            name: message.name.clone(),
            email: message.email.clone(),
            message: message.message.clone(),
        };
        self.messages.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn count_messages(&self) -> RepoResult<i64> {
        self.touch();
        Ok(self.messages.lock().unwrap().len() as i64)
    }

    async fn find_user_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        self.touch();
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_user(&self, user: &NewUser) -> RepoResult<User> {
        self.touch();
        let created = User {
            id: self.next_id(),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
        };
        self.users.lock().unwrap().push(created.clone());
        Ok(created)
    }
}

// --- TEST UTILITIES ---

pub fn project(id: i64, title: &str) -> Project {
    Project {
        id,
        title: title.to_string(),
        description: format!("{title} description"),
        image_url: format!("/static/{id}.png"),
        project_link: None,
    }
}

pub fn project_form(title: &str, link: Option<&str>) -> ProjectForm {
    ProjectForm {
        title: title.to_string(),
        description: "A description".to_string(),
        image_url: "/static/img.png".to_string(),
        project_link: link.map(str::to_string),
    }
}

/// AppState over a mock repository. The returned `Arc` is the same repository
/// the state uses.
pub fn mock_state(repo: MockRepo) -> (AppState, Arc<MockRepo>) {
    let repo = Arc::new(repo);
    let state = AppState {
        repo: repo.clone(),
        sessions: Arc::new(InMemorySessionStore::new()),
        hasher: Arc::new(Argon2Hasher),
        config: AppConfig::default(),
    };
    (state, repo)
}

/// Adds the standard admin account to a mock repository.
pub fn with_admin(repo: MockRepo) -> MockRepo {
    let hash = Argon2Hasher.hash(ADMIN_PASSWORD).unwrap();
    repo.users.lock().unwrap().push(User {
        id: 1,
        username: ADMIN_USERNAME.to_string(),
        email: "admin@example.com".to_string(),
        password_hash: hash,
    });
    repo
}

/// AppState over a fresh in-memory SQLite database with the standard admin seeded.
pub async fn sqlite_state() -> AppState {
    let config = AppConfig {
        admin: Some(AdminSeed {
            username: ADMIN_USERNAME.to_string(),
            email: "admin@example.com".to_string(),
            password: ADMIN_PASSWORD.to_string(),
        }),
        ..AppConfig::default()
    };
    AppState::initialize(config)
        .await
        .expect("in-memory database should initialise")
}

/// A live admin session in `state`'s session store.
pub async fn admin_session(state: &AppState) -> AdminSession {
    let token: SessionToken = state
        .sessions
        .create(1)
        .await
        .expect("in-memory session store accepts writes");
    AdminSession { token, user_id: 1 }
}
