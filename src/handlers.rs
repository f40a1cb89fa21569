use crate::{
    AppState, auth,
    auth::AdminSession,
    error::{AppError, AppResult},
    flash::{self, FlashRedirect, Notice},
    models::{ContactForm, LoginForm, ProjectForm},
    session, views,
};
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use axum_extra::extract::cookie::CookieJar;

type Page = (CookieJar, Html<String>);

/// Renders a page with the pending flash notice and clears that notice.
fn render(jar: CookieJar, page: impl FnOnce(Option<Notice>) -> Html<String>) -> Page {
    let (jar, notice) = flash::take(jar);
    (jar, page(notice))
}

// --- Public Handlers ---

/// home
///
/// [Public Route] Landing page listing every project in store order.
pub async fn home(State(state): State<AppState>, jar: CookieJar) -> AppResult<Page> {
    let projects = state.repo.list_projects().await?;
    Ok(render(jar, |notice| views::home(&projects, notice)))
}

/// [Public Route] Static about page.
pub async fn about(jar: CookieJar) -> Page {
    render(jar, views::about)
}

/// projects
///
/// [Public Route] Same listing as the home page on its own page.
pub async fn projects(State(state): State<AppState>, jar: CookieJar) -> AppResult<Page> {
    let projects = state.repo.list_projects().await?;
    Ok(render(jar, |notice| views::projects(&projects, notice)))
}

/// [Public Route] Static resume page.
pub async fn resume(jar: CookieJar) -> Page {
    render(jar, views::resume)
}

pub async fn contact_form(jar: CookieJar) -> Page {
    render(jar, views::contact)
}

/// submit_contact
///
/// [Public Route] Validates and stores a contact message. On any rule violation
/// nothing is written and the visitor is sent back to the form with a notice.
pub async fn submit_contact(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> AppResult<FlashRedirect> {
    let message = form.validate()?;
    let stored = state.repo.create_message(&message).await?;
    tracing::info!(message_id = stored.id, "contact message stored");
    Ok(FlashRedirect::new(Notice::MessageSent, "/contact"))
}

/// Router fallback for unknown paths.
pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, views::not_found())
}

// --- Session Handlers ---

pub async fn login_form(jar: CookieJar) -> Page {
    render(jar, views::admin_login)
}

/// login
///
/// [Public Route] Checks the submitted credentials and, on success, hands the
/// browser a session cookie and sends it to the dashboard.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<(CookieJar, FlashRedirect)> {
    let token = auth::login(
        state.repo.as_ref(),
        &state.hasher,
        state.sessions.as_ref(),
        &form.username,
        &form.password,
    )
    .await?;

    let jar = jar.add(session::session_cookie(token, state.config.secure_cookies()));
    Ok((jar, FlashRedirect::new(Notice::LoggedIn, "/admin/dashboard")))
}

/// logout
///
/// Clears the session. Not gated: an anonymous logout behaves the same as a real one.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, FlashRedirect) {
    let jar = auth::logout(state.sessions.as_ref(), jar).await;
    (jar, FlashRedirect::new(Notice::LoggedOut, "/"))
}

// --- Admin Handlers ---

/// dashboard
///
/// [Admin Route] The admin listing. Shows exactly what the public listing shows.
pub async fn dashboard(
    _admin: AdminSession,
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<Page> {
    let projects = state.repo.list_projects().await?;
    Ok(render(jar, |notice| views::admin_dashboard(&projects, notice)))
}

pub async fn add_project_form(_admin: AdminSession, jar: CookieJar) -> Page {
    render(jar, views::add_project)
}

/// add_project
///
/// [Admin Route] Creates a project. No field validation beyond what the store enforces.
pub async fn add_project(
    admin: AdminSession,
    State(state): State<AppState>,
    Form(form): Form<ProjectForm>,
) -> AppResult<FlashRedirect> {
    let project = state.repo.create_project(&form).await?;
    tracing::info!(project_id = project.id, user_id = admin.user_id, "project added");
    Ok(FlashRedirect::new(Notice::ProjectAdded, "/admin/dashboard"))
}

pub async fn edit_project_form(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> AppResult<Page> {
    let project = state
        .repo
        .get_project(id)
        .await?
        .ok_or_else(|| AppError::project_not_found(id))?;
    Ok(render(jar, |notice| views::edit_project(&project, notice)))
}

/// edit_project
///
/// [Admin Route] Overwrites all four editable fields, even when they are empty
/// or unchanged.
pub async fn edit_project(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ProjectForm>,
) -> AppResult<FlashRedirect> {
    state
        .repo
        .update_project(id, &form)
        .await?
        .ok_or_else(|| AppError::project_not_found(id))?;
    tracing::info!(project_id = id, user_id = admin.user_id, "project updated");
    Ok(FlashRedirect::new(Notice::ProjectUpdated, "/admin/dashboard"))
}

/// delete_project
///
/// [Admin Route] Permanently removes a project. There is no soft delete.
pub async fn delete_project(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<FlashRedirect> {
    if !state.repo.delete_project(id).await? {
        return Err(AppError::project_not_found(id));
    }
    tracing::info!(project_id = id, user_id = admin.user_id, "project deleted");
    Ok(FlashRedirect::new(Notice::ProjectDeleted, "/admin/dashboard"))
}
