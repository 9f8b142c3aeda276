mod landing;
pub use landing::LandingPage;

mod login;
pub use login::LoginPage;

mod note_list;
pub use note_list::NoteListPage;

mod note_form;
pub use note_form::NoteFields;

mod new_note;
pub use new_note::NewNotePage;

mod note_detail;
pub use note_detail::NoteDetailPage;

mod error;
pub use error::ErrorPage;
