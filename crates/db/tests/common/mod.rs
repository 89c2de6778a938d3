//! Shared builders for the repository test suites.

#![allow(dead_code)]

use std::collections::BTreeSet;

use opsdesk_db::models::{App, SaveBusinessManager, SavePage, SaveProfile, SaveProject};

pub fn id_set(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

pub fn save_profile(id: Option<&str>, name: &str, page_ids: &[&str]) -> SaveProfile {
    SaveProfile {
        id: id.map(str::to_string),
        name: name.to_string(),
        status: None,
        role: None,
        email: None,
        notes: None,
        password: None,
        two_factor_secret: None,
        recovery_codes: None,
        page_ids: id_set(page_ids),
    }
}

pub fn save_page(id: Option<&str>, name: &str, profile_ids: &[&str]) -> SavePage {
    SavePage {
        id: id.map(str::to_string),
        name: name.to_string(),
        status: None,
        external_id: None,
        category: None,
        url: None,
        profile_ids: id_set(profile_ids),
    }
}

pub fn save_project(id: Option<&str>, name: &str, chatbot_id: Option<&str>) -> SaveProject {
    SaveProject {
        id: id.map(str::to_string),
        name: name.to_string(),
        status: None,
        description: None,
        countries: Vec::new(),
        chatbot_id: chatbot_id.map(str::to_string),
    }
}

pub fn save_bm(id: Option<&str>, name: &str, apps: Vec<App>) -> SaveBusinessManager {
    SaveBusinessManager {
        id: id.map(str::to_string),
        name: name.to_string(),
        status: None,
        ad_accounts: Vec::new(),
        apps,
    }
}

pub fn app(id: &str, name: &str, project_ids: &[&str]) -> App {
    App {
        id: id.to_string(),
        name: name.to_string(),
        project_ids: id_set(project_ids),
    }
}
