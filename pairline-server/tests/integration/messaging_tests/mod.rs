mod test_signaling_round_trip;
