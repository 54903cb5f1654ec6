mod pot_iterations;
