// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Random CSV demo-data generation.
//!
//! Files are written to [`SeedConfig::directory`], which is created when
//! missing. `invites.csv` reuses the e-mails in `users.csv`, so users are
//! generated first.

use crate::config::SeedConfig;
use crate::error::SeedError;
use crate::fake;
use crate::file::{column_index, read_csv_file};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

pub const USER_HEADERS: [&str; 7] = [
    "First Name",
    "Last Name",
    "Email",
    "Password",
    "AuthProvider",
    "OrganizationIDs",
    "Verified",
];

pub const INVITE_ROLES: [&str; 2] = ["MEMBER", "ADMIN"];

const PASSWORD_LENGTH: usize = 20;

impl SeedConfig {
    /// Write every CSV file whose count is non-zero.
    pub fn generate(&self) -> Result<(), SeedError> {
        std::fs::create_dir_all(&self.directory)?;

        self.generate_organizations()?;
        self.generate_groups()?;
        self.generate_users()?;
        self.generate_invites()?;
        self.generate_subscribers()?;

        info!(directory = %self.directory.display(), "Demo data generated");
        Ok(())
    }

    pub fn generate_organizations(&self) -> Result<(), SeedError> {
        if self.num_organizations == 0 {
            return Ok(());
        }

        let mut rng = rand::rng();
        let rows = (0..self.num_organizations).map(|_| vec![fake::company(&mut rng)]);
        write_csv(&self.organizations_file(), &["Name"], rows)
    }

    pub fn generate_groups(&self) -> Result<(), SeedError> {
        if self.num_groups == 0 {
            return Ok(());
        }

        let mut rng = rand::rng();
        let rows = group_names(&mut rng, self.num_groups).into_iter().map(|name| vec![name]);
        write_csv(&self.groups_file(), &["Name"], rows)
    }

    pub fn generate_users(&self) -> Result<(), SeedError> {
        if self.num_users == 0 {
            return Ok(());
        }

        std::fs::create_dir_all(&self.directory)?;
        let mut rng = rand::rng();
        let rows = (0..self.num_users).map(|_| user_row(&mut rng));
        write_csv(&self.users_file(), &USER_HEADERS, rows)
    }

    pub fn generate_invites(&self) -> Result<(), SeedError> {
        if self.num_invites == 0 {
            return Ok(());
        }

        let mut rng = rand::rng();
        let emails = user_emails(&self.users_file(), self.num_invites)?;
        let rows = emails.into_iter().map(|email| {
            let role = INVITE_ROLES.choose(&mut rng).copied().unwrap_or("MEMBER");
            vec![email, role.to_string()]
        });
        write_csv(&self.invites_file(), &["Recipient", "Role"], rows)
    }

    pub fn generate_subscribers(&self) -> Result<(), SeedError> {
        if self.num_subscribers == 0 {
            return Ok(());
        }

        let mut rng = rand::rng();
        let rows = (0..self.num_subscribers).map(|_| {
            let person = fake::person(&mut rng);
            vec![person_email(&person)]
        });
        write_csv(&self.subscribers_file(), &["Email"], rows)
    }
}

fn write_csv<I>(path: &Path, headers: &[&str], rows: I) -> Result<(), SeedError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn person_email(person: &fake::Person) -> String {
    format!(
        "{}.{}@example.com",
        person.first_name.to_lowercase(),
        person.last_name.to_lowercase()
    )
}

fn user_row<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let person = fake::person(rng);
    let email = person_email(&person);
    // The generated password may lack a special character.
    let password = format!("{}!", fake::password(rng, PASSWORD_LENGTH));
    let verified = if rng.random_bool(0.5) { "true" } else { "false" };

    vec![
        person.first_name,
        person.last_name,
        email,
        password,
        "CREDENTIALS".to_string(),
        "[ORGANIZATION_ID]".to_string(),
        verified.to_string(),
    ]
}

/// Title-cased adjectives, duplicates removed, first occurrence kept.
fn group_names<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    (0..count)
        .map(|_| fake::title_case(&fake::adjective(rng)))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Up to `count` e-mails from the users file, topped up with random ones.
/// All random when the file does not exist.
pub fn user_emails(users_file: &Path, count: usize) -> Result<Vec<String>, SeedError> {
    let mut rng = rand::rng();

    if !users_file.exists() {
        return Ok((0..count).map(|_| fake::email(&mut rng)).collect());
    }

    let records = read_csv_file(users_file)?;
    let headers = records
        .first()
        .ok_or_else(|| SeedError::EmptyFile(users_file.display().to_string()))?;
    let email_index = column_index(headers, "Email").ok_or_else(|| SeedError::ColumnNotFound("Email".to_string()))?;

    let mut emails: Vec<String> = records
        .iter()
        .skip(1)
        .take(count)
        .filter_map(|record| record.get(email_index).cloned())
        .collect();

    while emails.len() < count {
        emails.push(fake::email(&mut rng));
    }

    Ok(emails)
}
