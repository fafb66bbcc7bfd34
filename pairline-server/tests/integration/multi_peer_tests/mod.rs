mod test_cross_room_isolation;
mod test_survivor_is_not_requeued;
