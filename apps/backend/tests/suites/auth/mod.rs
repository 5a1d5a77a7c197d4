mod current_user;
mod login;
mod logout;
mod refresh;
mod signup;
