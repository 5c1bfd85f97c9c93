fn main() {
    gyro_demos::run(gyro_demos::variants::lit_cube());
}
