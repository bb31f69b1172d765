mod dispatcher;
mod helpers;
mod transport;
