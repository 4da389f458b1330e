pub mod month_view;
pub mod status_bar;
pub mod task_form;
pub mod task_list;

pub use month_view::MonthView;
pub use status_bar::StatusBar;
pub use task_form::TaskForm;
pub use task_list::TaskList;
