mod helper;
mod metrics;
mod poller;
