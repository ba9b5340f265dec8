//! Home screen of an administrator

use crossterm::event::{KeyCode, KeyEvent};

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookForm},
        user::{NewUser, User},
    },
    services::Services,
};

use crate::tui::{
    app::Transition,
    form::{Field, Form, FormAction},
    list::{ListAction, SearchableList},
};

use super::{Answer, Confirm};

pub const MENU: [&str; 4] = ["Add a book", "Book management", "User management", "My account"];
pub const ADD_BOOK: usize = 0;
pub const BOOKS: usize = 1;
pub const USERS: usize = 2;

/// Add/edit book form with live format checking
#[derive(Debug, Clone)]
pub struct BookEditor {
    /// Book being edited; `None` when adding
    pub book_id: Option<i64>,
    pub form: Form,
    pub feedback: Option<&'static str>,
}

impl BookEditor {
    pub fn blank() -> Self {
        Self {
            book_id: None,
            form: Form::new(vec![
                Field::text("Title"),
                Field::text("Author"),
                Field::text("Quantity"),
                Field::text("Publisher"),
                Field::text("Publication year"),
                Field::text("Edition"),
                Field::text("Description"),
            ]),
            feedback: None,
        }
    }

    pub fn for_book(book: &Book) -> Self {
        let mut editor = Self::blank();
        let form = BookForm::from_book(book);
        for (index, value) in [
            form.title,
            form.author,
            form.quantity,
            form.publisher,
            form.pub_year,
            form.edition,
            form.description,
        ]
        .into_iter()
        .enumerate()
        {
            editor.form.set_value(index, value);
        }
        editor.book_id = Some(book.book_id);
        editor
    }

    pub fn book_form(&self) -> BookForm {
        BookForm {
            title: self.form.value(0).to_string(),
            author: self.form.value(1).to_string(),
            quantity: self.form.value(2).to_string(),
            publisher: self.form.value(3).to_string(),
            pub_year: self.form.value(4).to_string(),
            edition: self.form.value(5).to_string(),
            description: self.form.value(6).to_string(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        let action = self.form.handle_key(key);
        if action == FormAction::Edited {
            self.feedback = self.book_form().format_error();
        }
        action
    }
}

/// Add-user form with live signup checks
#[derive(Debug, Clone)]
pub struct UserEditor {
    pub form: Form,
    pub feedback: Option<String>,
}

impl UserEditor {
    fn new() -> Self {
        Self {
            form: Form::new(vec![
                Field::text("Email"),
                Field::text("Username"),
                Field::secret("Password"),
            ]),
            feedback: None,
        }
    }

    fn new_user(&self) -> NewUser {
        NewUser::new(self.form.value(0).trim(), self.form.value(1).trim(), self.form.value(2))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    RemoveBook(i64),
    RemoveUser(String),
}

pub struct AdminHome {
    pub add_book: BookEditor,
    pub books: SearchableList<Book>,
    pub edit_book: Option<BookEditor>,
    pub users: SearchableList<User>,
    pub add_user: Option<UserEditor>,
    pub confirm: Option<Confirm<AdminAction>>,
}

impl AdminHome {
    pub async fn load(services: &Services, user: &User) -> AppResult<Self> {
        let mut home = Self {
            add_book: BookEditor::blank(),
            books: SearchableList::default(),
            edit_book: None,
            users: SearchableList::default(),
            add_user: None,
            confirm: None,
        };
        home.reload(services, user).await?;
        Ok(home)
    }

    pub async fn reload(&mut self, services: &Services, user: &User) -> AppResult<()> {
        self.books.replace(services.catalog.list_books().await?);
        self.users.replace(services.users.list_users(user).await?);
        Ok(())
    }

    pub async fn handle_key(
        &mut self,
        tab: usize,
        key: KeyEvent,
        services: &Services,
        user: &User,
    ) -> AppResult<Transition> {
        if let Some(confirm) = self.confirm.take() {
            return match Confirm::<AdminAction>::answer(key) {
                Answer::Yes => self.perform(confirm.action, services, user).await,
                Answer::No => Ok(Transition::Stay),
                Answer::Pending => {
                    self.confirm = Some(confirm);
                    Ok(Transition::Stay)
                }
            };
        }

        match tab {
            ADD_BOOK => self.add_book_key(key, services, user).await,
            BOOKS => self.books_key(key, services, user).await,
            USERS => self.users_key(key, services, user).await,
            _ => Ok(Transition::Stay),
        }
    }

    async fn perform(&mut self, action: AdminAction, services: &Services, user: &User) -> AppResult<Transition> {
        let notice = match action {
            AdminAction::RemoveBook(book_id) => {
                services.catalog.remove_book(user, book_id).await?;
                "Book removed".to_string()
            }
            AdminAction::RemoveUser(username) => {
                services.users.remove_user(user, &username).await?;
                format!("User {} removed", username)
            }
        };
        self.reload(services, user).await?;
        Ok(Transition::Notice(notice))
    }

    async fn add_book_key(&mut self, key: KeyEvent, services: &Services, user: &User) -> AppResult<Transition> {
        match self.add_book.handle_key(key) {
            FormAction::Submit => {
                let book = services.catalog.add_book(user, &self.add_book.book_form()).await?;
                self.add_book = BookEditor::blank();
                self.reload(services, user).await?;
                Ok(Transition::Notice(format!("Added {}", book.title)))
            }
            FormAction::Cancel => Ok(Transition::Menu),
            FormAction::Edited | FormAction::None => Ok(Transition::Stay),
        }
    }

    async fn books_key(&mut self, key: KeyEvent, services: &Services, user: &User) -> AppResult<Transition> {
        if let Some(editor) = self.edit_book.as_mut() {
            return match editor.handle_key(key) {
                FormAction::Submit => {
                    let form = editor.book_form();
                    let Some(book_id) = editor.book_id else {
                        return Ok(Transition::Stay);
                    };
                    let book = services.catalog.update_book(user, book_id, &form).await?;
                    self.edit_book = None;
                    self.reload(services, user).await?;
                    Ok(Transition::Notice(format!("Updated {}", book.title)))
                }
                FormAction::Cancel => {
                    self.edit_book = None;
                    Ok(Transition::Stay)
                }
                FormAction::Edited | FormAction::None => Ok(Transition::Stay),
            };
        }

        if self.books.handle_key(key) == ListAction::Handled {
            return Ok(Transition::Stay);
        }

        match key.code {
            KeyCode::Esc => Ok(Transition::Menu),
            KeyCode::Char('e') => {
                if let Some(book) = self.books.selected() {
                    self.edit_book = Some(BookEditor::for_book(book));
                }
                Ok(Transition::Stay)
            }
            KeyCode::Char('x') => {
                if let Some(book) = self.books.selected() {
                    self.confirm = Some(Confirm::new(
                        format!("Remove {}?", book.title),
                        AdminAction::RemoveBook(book.book_id),
                    ));
                }
                Ok(Transition::Stay)
            }
            _ => Ok(Transition::Stay),
        }
    }

    async fn users_key(&mut self, key: KeyEvent, services: &Services, user: &User) -> AppResult<Transition> {
        if let Some(editor) = self.add_user.as_mut() {
            return match editor.form.handle_key(key) {
                FormAction::Edited => {
                    editor.feedback = services.auth.validate_signup(&editor.new_user(), false).await?;
                    Ok(Transition::Stay)
                }
                FormAction::Submit => {
                    let created = services.users.add_user(user, editor.new_user()).await?;
                    self.add_user = None;
                    self.reload(services, user).await?;
                    Ok(Transition::Notice(format!("User {} added", created.username)))
                }
                FormAction::Cancel => {
                    self.add_user = None;
                    Ok(Transition::Stay)
                }
                FormAction::None => Ok(Transition::Stay),
            };
        }

        if self.users.handle_key(key) == ListAction::Handled {
            return Ok(Transition::Stay);
        }

        if key.code == KeyCode::Esc {
            return Ok(Transition::Menu);
        }
        if key.code == KeyCode::Char('a') {
            self.add_user = Some(UserEditor::new());
            return Ok(Transition::Stay);
        }

        let Some(target) = self.users.selected().map(|u| u.username.clone()) else {
            return Ok(Transition::Stay);
        };

        match key.code {
            KeyCode::Char('x') => {
                self.confirm = Some(Confirm::new(
                    format!("Remove user {}?", target),
                    AdminAction::RemoveUser(target),
                ));
                Ok(Transition::Stay)
            }
            KeyCode::Char('g') => {
                services.users.promote(user, &target).await?;
                self.reload(services, user).await?;
                Ok(Transition::Notice(format!("{} is now an administrator", target)))
            }
            KeyCode::Char('v') => {
                let (_, demoted_self) = services.users.demote(user, &target).await?;
                if demoted_self {
                    return Ok(Transition::Logout(Some(
                        "You revoked your own admin rights".to_string(),
                    )));
                }
                self.reload(services, user).await?;
                Ok(Transition::Notice(format!("{} is no longer an administrator", target)))
            }
            _ => Ok(Transition::Stay),
        }
    }
}
