mod console;
mod helpers;
mod unsubscribe;
