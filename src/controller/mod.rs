//! Screen controller for the account manager
//!
//! A three-state machine (`login`, `list`, `edit`) that decides which form is
//! shown and which record store operation is available. Store failures are
//! absorbed here: a failed fetch is logged and leaves the list as it was, the
//! other operations surface the store's message as a notice. Only misuse of
//! the state machine itself is returned as an error.

pub mod event;
pub mod screen;
pub mod view;

pub use event::ScreenEvent;
pub use screen::{Navigation, Screen};
pub use view::{ScreenSnapshot, View};

use crate::constants::{NOTICE_DELETED, NOTICE_REGISTERED, NOTICE_UPDATED};
use crate::error::{AppError, Result};
use crate::models::{UserFields, UserRecord};
use crate::store::RecordStore;

/// Record being edited, with the values typed so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub id: String,
    pub fields: UserFields,
}

impl From<&UserRecord> for EditForm {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id.clone(),
            fields: record.fields(),
        }
    }
}

pub struct ScreenController<S> {
    store: S,
    screen: Screen,
    login_form: UserFields,
    edit_form: Option<EditForm>,
    records: Vec<UserRecord>,
    notice: Option<String>,
}

impl<S: RecordStore> ScreenController<S> {
    /// Controller on the list screen with nothing fetched yet
    pub fn new(store: S) -> Self {
        Self {
            store,
            screen: Screen::List,
            login_form: UserFields::default(),
            edit_form: None,
            records: Vec::new(),
            notice: None,
        }
    }

    /// Controller on the list screen, after the entry fetch
    pub async fn start(store: S) -> Self {
        let mut controller = Self::new(store);
        controller.refresh().await;
        controller
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn login_form(&self) -> &UserFields {
        &self.login_form
    }

    pub fn edit_form(&self) -> Option<&EditForm> {
        self.edit_form.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn render(&self) -> View {
        match self.screen {
            Screen::Login => View::Login {
                email: self.login_form.email.clone(),
                password: self.login_form.password.clone(),
            },
            Screen::List => View::List {
                users: self.records.clone(),
            },
            Screen::Edit => match &self.edit_form {
                Some(form) => View::Edit {
                    id: form.id.clone(),
                    email: form.fields.email.clone(),
                    password: form.fields.password.clone(),
                },
                None => View::Blank,
            },
        }
    }

    pub fn snapshot(&self) -> ScreenSnapshot {
        ScreenSnapshot {
            view: self.render(),
            notice: self.notice.clone(),
        }
    }

    /// Apply one user action
    ///
    /// An accepted action replaces the previous notice; a rejected one leaves
    /// the session exactly as it was, notice included.
    pub async fn dispatch(&mut self, event: ScreenEvent) -> Result<()> {
        let previous_notice = self.notice.take();

        let result = match event {
            ScreenEvent::ShowLogin => self.show_login(),
            ScreenEvent::GoToList => self.go_to_list().await,
            ScreenEvent::Refresh => {
                self.refresh().await;
                Ok(())
            }
            ScreenEvent::EditPressed { index } => self.edit_pressed(index),
            ScreenEvent::BackPressed => self.back_pressed().await,
            ScreenEvent::SetEmail { value } => self.set_email(value),
            ScreenEvent::SetPassword { value } => self.set_password(value),
            ScreenEvent::SubmitRegistration => self.submit_registration().await,
            ScreenEvent::SubmitUpdate => self.submit_update().await,
            ScreenEvent::Delete { index } => self.delete_at(index).await,
        };

        if result.is_err() {
            self.notice = previous_notice;
        }
        result
    }

    /// Replace the list with the store's contents
    ///
    /// On failure the list keeps whatever the last successful fetch produced.
    pub async fn refresh(&mut self) {
        match self.store.fetch_all().await {
            Ok(records) => {
                tracing::debug!("List refreshed with {} records", records.len());
                self.records = records;
            }
            Err(e) => {
                tracing::error!("Failed to fetch users, keeping stale list: {}", e);
            }
        }
    }

    pub fn show_login(&mut self) -> Result<()> {
        self.navigate(Navigation::ShowLogin)
    }

    pub async fn go_to_list(&mut self) -> Result<()> {
        self.navigate(Navigation::GoToList)?;
        self.refresh().await;
        Ok(())
    }

    /// Open the edit form for the record displayed at `index`
    pub fn edit_pressed(&mut self, index: usize) -> Result<()> {
        self.require(Screen::List, Navigation::EditPressed.name())?;

        let Some(record) = self.records.get(index) else {
            tracing::warn!("Edit pressed on missing row {}", index);
            return Err(AppError::NoRecordSelected);
        };

        self.edit_form = Some(EditForm::from(record));
        self.navigate(Navigation::EditPressed)
    }

    pub async fn back_pressed(&mut self) -> Result<()> {
        self.navigate(Navigation::BackPressed)?;
        self.edit_form = None;
        self.refresh().await;
        Ok(())
    }

    /// Type into the email field of the open form
    pub fn set_email(&mut self, value: String) -> Result<()> {
        self.active_form("set_email")?.email = value;
        Ok(())
    }

    /// Type into the password field of the open form
    pub fn set_password(&mut self, value: String) -> Result<()> {
        self.active_form("set_password")?.password = value;
        Ok(())
    }

    /// Add the login form's values as a new record
    ///
    /// Success clears the form; failure keeps what was typed and shows the
    /// store's message. Nothing stops the same values being submitted twice.
    pub async fn submit_registration(&mut self) -> Result<()> {
        self.require(Screen::Login, "submit_registration")?;

        match self.store.add(self.login_form.clone()).await {
            Ok(id) => {
                tracing::info!("Registered user {}", id);
                self.login_form.clear();
                self.notice = Some(NOTICE_REGISTERED.to_string());
            }
            Err(e) => {
                tracing::warn!("Registration failed: {}", e);
                self.notice = Some(e.to_string());
            }
        }

        Ok(())
    }

    /// Store the edit form and return to the list
    ///
    /// On failure the edit screen stays up with the typed values.
    pub async fn submit_update(&mut self) -> Result<()> {
        self.require(Screen::Edit, Navigation::UpdateSubmitted.name())?;

        let Some(form) = self.edit_form.clone() else {
            return Err(AppError::NoRecordSelected);
        };

        match self.store.update(&form.id, form.fields).await {
            Ok(()) => {
                self.navigate(Navigation::UpdateSubmitted)?;
                self.edit_form = None;
                self.notice = Some(NOTICE_UPDATED.to_string());
                self.refresh().await;
            }
            Err(e) => {
                tracing::warn!("Update of user {} failed: {}", form.id, e);
                self.notice = Some(e.to_string());
            }
        }

        Ok(())
    }

    /// Delete the record displayed at `index`
    ///
    /// The row is dropped from the list only once the store confirms; a failed
    /// delete leaves it displayed.
    pub async fn delete_at(&mut self, index: usize) -> Result<()> {
        self.require(Screen::List, "delete")?;

        let Some(id) = self.records.get(index).map(|r| r.id.clone()) else {
            tracing::warn!("Delete pressed on missing row {}", index);
            return Err(AppError::NoRecordSelected);
        };

        match self.store.delete(&id).await {
            Ok(()) => {
                self.records.remove(index);
                self.notice = Some(NOTICE_DELETED.to_string());
            }
            Err(e) => {
                tracing::warn!("Delete of user {} failed: {}", id, e);
                self.notice = Some(e.to_string());
            }
        }

        Ok(())
    }

    fn navigate(&mut self, nav: Navigation) -> Result<()> {
        let next = self.screen.next(nav).ok_or(AppError::InvalidTransition {
            from: self.screen,
            event: nav.name(),
        })?;

        tracing::debug!("Screen {} -> {}", self.screen, next);
        self.screen = next;
        Ok(())
    }

    fn require(&self, screen: Screen, event: &'static str) -> Result<()> {
        if self.screen == screen {
            Ok(())
        } else {
            Err(AppError::InvalidTransition {
                from: self.screen,
                event,
            })
        }
    }

    fn active_form(&mut self, event: &'static str) -> Result<&mut UserFields> {
        match self.screen {
            Screen::Login => Ok(&mut self.login_form),
            Screen::Edit => self
                .edit_form
                .as_mut()
                .map(|form| &mut form.fields)
                .ok_or(AppError::NoRecordSelected),
            Screen::List => Err(AppError::InvalidTransition {
                from: self.screen,
                event,
            }),
        }
    }
}
