//! The interactive program: login loop, then the main menu and its
//! submenus, until the user exits or input ends.

use std::io::{BufRead, Write};

use hms_core::render::{hospital_table, patient_table};
use hms_core::{
    CityMatches, CredentialGate, FieldSpec, Hospital, HospitalQuery, LoginOutcome,
    OverlongPolicy, Patient, PatientQuery, SignupOutcome, SortCriterion,
};
use tracing::{info, warn};

use crate::console::{Console, InputClosed};
use crate::menu::{AuthChoice, HospitalChoice, MainChoice, PatientChoice, SortChoice};

pub struct Services {
    pub hospitals: HospitalQuery,
    pub patients: PatientQuery,
    pub gate: CredentialGate,
    pub overlong: OverlongPolicy,
}

pub struct Session<R, W> {
    services: Services,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub const fn new(services: Services, console: Console<R, W>) -> Self {
        Self { services, console }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        match self.drive().await {
            Err(e) if e.is::<InputClosed>() => {
                info!("Input closed, leaving");
                Ok(())
            }
            other => other,
        }
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        self.console.banner()?;
        if self.authenticate().await? {
            self.console.pause()?;
            self.main_menu().await?;
        }

        self.console.success("Thank you for using the Hospital Management System!")?;
        self.console.rule()?;
        self.console.notice("Exiting...")
    }

    /// Report a failed action and carry on; only closed input escapes.
    fn settle(&mut self, result: anyhow::Result<()>) -> anyhow::Result<()> {
        match result {
            Err(e) if e.is::<InputClosed>() => Err(e),
            Err(e) => {
                warn!("Action failed: {e:#}");
                self.console.error(&format!("Error: {e}"))
            }
            Ok(()) => Ok(()),
        }
    }

    /// `true` once a login succeeds, `false` when the user exits.
    async fn authenticate(&mut self) -> anyhow::Result<bool> {
        loop {
            self.console.notice(
                "\nThe management system requires login, so if you do not have an account please sign up.",
            )?;
            match self.console.choose::<AuthChoice>()? {
                Some(AuthChoice::Signup) => {
                    let result = self.signup().await;
                    self.settle(result)?;
                }
                Some(AuthChoice::Login) => match self.login().await {
                    Ok(true) => {
                        self.console.rule()?;
                        self.console
                            .success("\nYou can now proceed to the main program.")?;
                        return Ok(true);
                    }
                    Ok(false) => {}
                    Err(e) => self.settle(Err(e))?,
                },
                Some(AuthChoice::Exit) => return Ok(false),
                None => {
                    self.console.rule()?;
                    self.console.error("\nInvalid choice! Enter 1, 2, or 3.")?;
                    self.console.rule()?;
                    self.console.banner()?;
                }
            }
        }
    }

    async fn signup(&mut self) -> anyhow::Result<()> {
        let overlong = self.services.overlong;
        let username = self
            .console
            .prompt_field("Enter username: ", FieldSpec::USERNAME, overlong)?;
        if self.services.gate.is_username_taken(&username).await? {
            self.console.error("Username already exists!")?;
            return self.console.rule();
        }

        let password = self
            .console
            .prompt_field("Enter password: ", FieldSpec::PASSWORD, overlong)?;
        match self.services.gate.signup(&username, &password).await? {
            SignupOutcome::Created => self
                .console
                .success("Sign-up successful! You can now login.")?,
            SignupOutcome::UsernameTaken => self.console.error("Username already exists!")?,
        }
        self.console.rule()
    }

    async fn login(&mut self) -> anyhow::Result<bool> {
        let overlong = self.services.overlong;
        let username = self
            .console
            .prompt_field("Enter username: ", FieldSpec::USERNAME, overlong)?;
        let password = self
            .console
            .prompt_field("Enter password: ", FieldSpec::PASSWORD, overlong)?;

        match self.services.gate.login(&username, &password).await? {
            LoginOutcome::Granted => {
                self.console.success("Login successful!")?;
                Ok(true)
            }
            LoginOutcome::Denied => {
                self.console.error("Invalid username or password!")?;
                self.console.rule()?;
                Ok(false)
            }
            LoginOutcome::NoUsers => {
                self.console
                    .notice("\nNo users found! Please sign up first.")?;
                Ok(false)
            }
        }
    }

    async fn main_menu(&mut self) -> anyhow::Result<()> {
        loop {
            self.console.banner()?;
            let acted = match self.console.choose::<MainChoice>()? {
                Some(MainChoice::Hospitals) => self.hospital_menu().await?,
                Some(MainChoice::Patients) => self.patient_menu().await?,
                Some(MainChoice::Sorting) => self.sorting_menu().await?,
                Some(MainChoice::Exit) => return Ok(()),
                None => {
                    self.console.error("Invalid choice! Try again.")?;
                    true
                }
            };
            if acted {
                self.console.pause()?;
            }
        }
    }

    /// Each submenu returns `false` when the user went straight back.
    async fn hospital_menu(&mut self) -> anyhow::Result<bool> {
        self.console.banner()?;
        let choice = self.console.choose::<HospitalChoice>()?;
        self.console.banner()?;
        let result = match choice {
            Some(HospitalChoice::Add) => self.add_hospital().await,
            Some(HospitalChoice::Display) => self.display_hospitals().await,
            Some(HospitalChoice::ByCity) => self.display_hospitals_by_city().await,
            Some(HospitalChoice::Back) => return Ok(false),
            None => self.console.error("Invalid choice! Try again."),
        };
        self.settle(result)?;
        Ok(true)
    }

    async fn patient_menu(&mut self) -> anyhow::Result<bool> {
        self.console.banner()?;
        let choice = self.console.choose::<PatientChoice>()?;
        self.console.banner()?;
        let result = match choice {
            Some(PatientChoice::Add) => self.add_patient().await,
            Some(PatientChoice::Display) => self.display_patients().await,
            Some(PatientChoice::Back) => return Ok(false),
            None => self.console.error("Invalid choice! Try again."),
        };
        self.settle(result)?;
        Ok(true)
    }

    async fn sorting_menu(&mut self) -> anyhow::Result<bool> {
        self.console.banner()?;
        let choice = self.console.choose::<SortChoice>()?;
        self.console.banner()?;
        let result = match choice {
            Some(SortChoice::By(criterion)) => self.display_sorted(criterion).await,
            Some(SortChoice::Back) => return Ok(false),
            None => self.console.error("Invalid choice! Try again."),
        };
        self.settle(result)?;
        Ok(true)
    }

    async fn add_hospital(&mut self) -> anyhow::Result<()> {
        let overlong = self.services.overlong;
        self.console
            .notice("\n\nPlease enter the following details to add a new hospital:")?;
        self.console.rule()?;

        let id = self.console.prompt_number("Enter Hospital ID: ")?;
        let name =
            self.console
                .prompt_field("Enter Hospital Name: ", FieldSpec::HOSPITAL_NAME, overlong)?;
        let city = self
            .console
            .prompt_field("Enter City: ", FieldSpec::CITY, overlong)?;
        let available_beds = self
            .console
            .prompt_number("Enter Number of Available Beds: ")?;
        let bed_price = self.console.prompt_amount("Enter Bed Price per Day: ")?;
        let rating = self.console.prompt_amount("Enter Hospital Rating (0-5): ")?;
        let review_count = self.console.prompt_number("Enter Number of Reviews: ")?;

        self.services
            .hospitals
            .add(&Hospital {
                id,
                name,
                city,
                available_beds,
                bed_price,
                rating,
                review_count,
            })
            .await?;

        self.console.rule()?;
        self.console.success("\nHospital added successfully!")
    }

    async fn display_hospitals(&mut self) -> anyhow::Result<()> {
        let hospitals = self.services.hospitals.list_all().await?;
        if hospitals.is_empty() {
            return self.console.error("No hospitals found!");
        }

        self.console.heading("Hospital Records")?;
        self.console.rule()?;
        self.console.table(&hospital_table(&hospitals))
    }

    async fn display_hospitals_by_city(&mut self) -> anyhow::Result<()> {
        self.console.rule()?;
        let city = self.console.prompt_field(
            "Enter City Name: ",
            FieldSpec::CITY,
            self.services.overlong,
        )?;

        match self.services.hospitals.filter_by_city(&city).await? {
            CityMatches::EmptyStore => self.console.error("No hospitals found!"),
            CityMatches::NoMatch => self.console.error("No hospitals found in this city."),
            CityMatches::Found(hospitals) => {
                self.console
                    .heading(&format!("Hospitals in {city} (Alphabetically Sorted)"))?;
                self.console.rule()?;
                self.console.table(&hospital_table(&hospitals))
            }
        }
    }

    async fn display_sorted(&mut self, criterion: SortCriterion) -> anyhow::Result<()> {
        let hospitals = self.services.hospitals.sort_by(criterion).await?;
        if hospitals.is_empty() {
            return self.console.error("No hospitals found!");
        }

        self.console.heading(criterion.heading())?;
        self.console.rule()?;
        self.console.table(&hospital_table(&hospitals))
    }

    async fn add_patient(&mut self) -> anyhow::Result<()> {
        let overlong = self.services.overlong;
        self.console
            .notice("\n\nPlease enter the following details to add a new patient:")?;
        self.console.rule()?;

        let id = self.console.prompt_number("Enter Patient ID: ")?;
        let name =
            self.console
                .prompt_field("Enter Patient Name: ", FieldSpec::PATIENT_NAME, overlong)?;
        let age = self.console.prompt_number("Enter Patient Age: ")?;
        let disease =
            self.console
                .prompt_field("Enter Disease/Condition: ", FieldSpec::DISEASE, overlong)?;
        let hospital_id = self
            .console
            .prompt_number("Enter Hospital ID (where patient is admitted): ")?;

        self.services
            .patients
            .add(&Patient {
                id,
                name,
                age,
                disease,
                hospital_id,
            })
            .await?;

        self.console.success("Patient added successfully!")
    }

    async fn display_patients(&mut self) -> anyhow::Result<()> {
        let rows = self.services.patients.list_all().await?;
        if rows.is_empty() {
            return self.console.error("No patients found!");
        }

        self.console.heading("Patient Records")?;
        self.console.rule()?;
        self.console.table(&patient_table(&rows))
    }
}
