pub mod todo_table;
