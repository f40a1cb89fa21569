//! Server-rendered pages.
//!
//! Every page goes through [`layout`], which adds navigation and the pending flash
//! notice. Any text that came from the store or a form is passed through [`escape`].

use axum::response::Html;
use std::fmt::Write;

use crate::{flash::Notice, models::Project};

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, notice: Option<Notice>, body: &str) -> Html<String> {
    let flash = notice
        .map(|n| {
            format!(
                r#"<div class="alert alert-{}" role="alert">{}</div>"#,
                n.category().as_str(),
                escape(n.text())
            )
        })
        .unwrap_or_default();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Portfolio</title>
</head>
<body>
<nav>
<a href="/">Home</a> <a href="/about">About</a> <a href="/projects">Projects</a> <a href="/resume">Resume</a> <a href="/contact">Contact</a>
</nav>
<main>
{flash}
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    ))
}

fn project_cards(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "<p>No projects yet.</p>".to_string();
    }

    let mut out = String::from(r#"<div class="projects">"#);
    for project in projects {
        let link = project
            .project_link
            .as_deref()
            .map(|l| format!(r#"<a href="{}">View project</a>"#, escape(l)))
            .unwrap_or_default();
        let _ = write!(
            out,
            r#"<article class="project"><img src="{}" alt="{}"><h3>{}</h3><p>{}</p>{}</article>"#,
            escape(&project.image_url),
            escape(&project.title),
            escape(&project.title),
            escape(&project.description),
            link,
        );
    }
    out.push_str("</div>");
    out
}

// --- Public pages ---

pub fn home(projects: &[Project], notice: Option<Notice>) -> Html<String> {
    let body = format!(
        "<h1>Welcome</h1><p>Software developer. A few things I have built:</p>{}",
        project_cards(projects)
    );
    layout("Home", notice, &body)
}

pub fn about(notice: Option<Notice>) -> Html<String> {
    layout(
        "About",
        notice,
        "<h1>About</h1>\
         <p>I build web backends and tools, mostly in Rust. I care about small, \
         well-tested services and readable code.</p>",
    )
}

pub fn projects(projects: &[Project], notice: Option<Notice>) -> Html<String> {
    let body = format!("<h1>Projects</h1>{}", project_cards(projects));
    layout("Projects", notice, &body)
}

pub fn resume(notice: Option<Notice>) -> Html<String> {
    layout(
        "Resume",
        notice,
        "<h1>Resume</h1>\
         <h2>Experience</h2><ul><li>Backend engineer: HTTP services, SQL stores, CI tooling.</li></ul>\
         <h2>Skills</h2><ul><li>Rust, SQL, Linux, Git</li></ul>",
    )
}

pub fn contact(notice: Option<Notice>) -> Html<String> {
    layout(
        "Contact",
        notice,
        r#"<h1>Contact</h1>
<form method="post" action="/contact">
<label for="name">Name</label><input id="name" name="name" required minlength="2">
<label for="email">Email</label><input id="email" name="email" type="email" required>
<label for="message">Message</label><textarea id="message" name="message" required minlength="10"></textarea>
<button type="submit">Send</button>
</form>"#,
    )
}

// --- Admin pages ---

pub fn admin_login(notice: Option<Notice>) -> Html<String> {
    layout(
        "Admin Login",
        notice,
        r#"<h1>Admin Login</h1>
<form method="post" action="/admin/login">
<label for="username">Username</label><input id="username" name="username" required>
<label for="password">Password</label><input id="password" name="password" type="password" required>
<button type="submit">Log in</button>
</form>"#,
    )
}

pub fn admin_dashboard(projects: &[Project], notice: Option<Notice>) -> Html<String> {
    let mut rows = String::new();
    for project in projects {
        let _ = write!(
            rows,
            r#"<tr><td>{id}</td><td>{title}</td><td><a href="/admin/project/edit/{id}">Edit</a> <a href="/admin/project/delete/{id}" onclick="return confirm('Delete this project?')">Delete</a></td></tr>"#,
            id = project.id,
            title = escape(&project.title),
        );
    }

    let body = format!(
        r#"<h1>Dashboard</h1>
<p><a href="/admin/project/add">Add project</a> <a href="/admin/logout">Log out</a></p>
<table><thead><tr><th>ID</th><th>Title</th><th>Actions</th></tr></thead><tbody>{rows}</tbody></table>"#
    );
    layout("Dashboard", notice, &body)
}

fn project_form(action: &str, submit: &str, project: Option<&Project>) -> String {
    let value = |f: fn(&Project) -> &str| project.map(f).map(escape).unwrap_or_default();
    let title = value(|p| &p.title);
    let description = value(|p| &p.description);
    let image_url = value(|p| &p.image_url);
    let link = value(|p| p.project_link.as_deref().unwrap_or(""));

    format!(
        r#"<form method="post" action="{action}">
<label for="title">Title</label><input id="title" name="title" value="{title}" required>
<label for="description">Description</label><textarea id="description" name="description" required>{description}</textarea>
<label for="image_url">Image URL</label><input id="image_url" name="image_url" value="{image_url}" required>
<label for="project_link">Project link</label><input id="project_link" name="project_link" value="{link}">
<button type="submit">{submit}</button>
</form>"#
    )
}

pub fn add_project(notice: Option<Notice>) -> Html<String> {
    let body = format!(
        "<h1>Add Project</h1>{}",
        project_form("/admin/project/add", "Add", None)
    );
    layout("Add Project", notice, &body)
}

pub fn edit_project(project: &Project, notice: Option<Notice>) -> Html<String> {
    let action = format!("/admin/project/edit/{}", project.id);
    let body = format!(
        "<h1>Edit Project</h1>{}",
        project_form(&action, "Save", Some(project))
    );
    layout("Edit Project", notice, &body)
}

pub fn not_found() -> Html<String> {
    layout(
        "Not Found",
        None,
        "<h1>Page not found</h1><p><a href=\"/\">Back to the home page</a></p>",
    )
}

pub fn server_error() -> Html<String> {
    layout(
        "Error",
        None,
        "<h1>Something went wrong</h1><p>Please try again later.</p>",
    )
}
