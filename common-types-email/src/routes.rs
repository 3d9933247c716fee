pub mod send_email;
