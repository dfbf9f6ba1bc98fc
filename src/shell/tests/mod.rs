mod test_game_basic;
mod test_shell_surface;
mod test_similarity_basic;
