pub mod birthday_announcements;
