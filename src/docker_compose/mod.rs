pub mod docker_compose;
