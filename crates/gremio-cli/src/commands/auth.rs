use super::Context;
use anyhow::{Result, bail};
use clap::Subcommand;
use gremio_application::ProfileUseCase;
use gremio_core::auth::{ClientRegistration, Credentials, ProfileUpdate, VendorRegistration};
use gremio_core::user::SessionStore;

#[derive(Subcommand)]
pub enum SpecialtiesAction {
    /// List the specialties offered by the marketplace
    List,
    /// Toggle a specialty in the picks used by `register-vendor`
    Select { code: String },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    Show,
    /// Update profile fields; unset flags keep their value
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        biography: Option<String>,
        #[arg(long)]
        experience: Option<String>,
        #[arg(long)]
        skills: Option<String>,
    },
}

pub async fn login(ctx: &Context, email: String, password: String) -> Result<()> {
    let mut shell = ctx.shell();
    let nav = shell.login(&Credentials::new(email, password)).await?;
    if let Some(user) = ctx.session.current_user() {
        println!("Logged in as {} ({})", user.name, user.role);
    }
    println!("-> {}", nav.route.path);
    Ok(())
}

pub async fn logout(ctx: &Context) -> Result<()> {
    ctx.shell().logout().await?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<()> {
    match ctx.session.current_user() {
        Some(user) => {
            println!("{} <{}>", user.name, user.email);
            println!("  id:   {}", user.id);
            println!("  role: {}", user.role);
            if let Some(specialties) = &user.specialties {
                println!("  specialties: {specialties}");
            }
        }
        None => println!("Not logged in"),
    }
    println!("backend: {}", ctx.config.api_base_url());
    tracing::debug!("Session stored in {}", ctx.paths.storage_dir().display());
    Ok(())
}

pub async fn register_client(
    ctx: &Context,
    names: String,
    surnames: String,
    email: String,
    password: String,
) -> Result<()> {
    let registration = ClientRegistration {
        names,
        surnames,
        email,
        password_confirmation: password.clone(),
        password,
    };
    ctx.shell().auth().register_client(&registration).await?;
    println!("Account created for {}. You can log in now.", registration.email);
    Ok(())
}

pub async fn register_vendor(
    ctx: &Context,
    company: String,
    email: String,
    password: String,
    specialties: Vec<String>,
) -> Result<()> {
    let specialties = if specialties.is_empty() {
        ctx.session.pending_specialties()?.codes
    } else {
        specialties
    };
    let registration = VendorRegistration {
        company_name: company,
        email,
        password_confirmation: password.clone(),
        password,
        specialties,
    };
    ctx.shell().auth().register_vendor(&registration).await?;
    ctx.session.save_pending_specialties(&Default::default())?;
    println!("Vendor account created for {}.", registration.email);
    Ok(())
}

pub async fn specialties(ctx: &Context, action: SpecialtiesAction) -> Result<()> {
    let available = ctx.services.analysis.specialties().await?;
    let mut pending = ctx.session.pending_specialties()?;
    match action {
        SpecialtiesAction::List => {
            for specialty in &available {
                let mark = if pending.codes.contains(&specialty.code) { "*" } else { " " };
                println!("{mark} {:<24} {}", specialty.code, specialty.name);
            }
        }
        SpecialtiesAction::Select { code } => {
            let Some(specialty) = available.iter().find(|s| s.code.eq_ignore_ascii_case(&code))
            else {
                bail!("unknown specialty '{code}'");
            };
            pending.toggle(&specialty.code, &specialty.name);
            ctx.session.save_pending_specialties(&pending)?;
            if pending.names.is_empty() {
                println!("No specialties selected");
            } else {
                println!("Selected: {}", pending.names.join(", "));
            }
        }
    }
    Ok(())
}

pub async fn profile(ctx: &Context, action: ProfileAction) -> Result<()> {
    let usecase = ProfileUseCase::new(ctx.services.profiles.clone(), ctx.services.session.clone());
    let current = usecase.load().await?;
    let profile = match action {
        ProfileAction::Show => current,
        ProfileAction::Update {
            name,
            phone,
            address,
            city,
            biography,
            experience,
            skills,
        } => {
            let update = ProfileUpdate {
                name: name.unwrap_or_else(|| current.name.clone()),
                phone: phone.or(current.phone),
                address: address.or(current.address),
                city: city.or(current.city),
                biography: biography.or(current.biography),
                experience: experience.or(current.experience),
                skills: skills.or(current.skills),
            };
            usecase.save(&update).await?
        }
    };

    println!("[{}] {} <{}>", profile.initials(), profile.name, profile.email);
    let fields = [
        ("phone", &profile.phone),
        ("address", &profile.address),
        ("city", &profile.city),
        ("biography", &profile.biography),
        ("experience", &profile.experience),
        ("skills", &profile.skills),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("  {label}: {value}");
        }
    }
    if !profile.specialties.is_empty() {
        println!("  specialties: {}", profile.specialties.join(", "));
    }
    Ok(())
}
